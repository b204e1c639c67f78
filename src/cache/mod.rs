//! Two-tier content-addressed caching.
//!
//! Two independent caches — full rendered documents and heading lists —
//! each backed by a bounded in-memory tier and an unbounded on-disk tier
//! keyed by the same [`ContentKey`]. Lookups check memory first, then disk
//! (promoting hits back into memory); stores hit memory synchronously and
//! disk as a spawned best-effort write.
//!
//! A `RenderCache` is an explicit instance with an explicit lifecycle:
//! construct one at process start, inject it into the coordinator, and it
//! lives until the process does (or until an administrative [`clear`]).
//! Nothing here is ambient global state, which is also what makes the cache
//! testable with a fresh instance per test.
//!
//! [`clear`]: RenderCache::clear

mod disk;
mod key;
mod memory;

pub use key::ContentKey;

use std::sync::Arc;

use disk::DiskTier;
use memory::MemoryTier;

use crate::config::CacheConfig;
use crate::document::{Heading, RenderedDocument};

/// Two-tier cache for rendered documents and heading lists.
#[derive(Debug)]
pub struct RenderCache {
    rendered: MemoryTier<RenderedDocument>,
    headings: MemoryTier<Vec<Heading>>,
    disk: Option<DiskTier>,
}

impl RenderCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            rendered: MemoryTier::new(config.max_memory_entries),
            headings: MemoryTier::new(config.max_memory_entries),
            disk: config.disk.then(|| DiskTier::new(&config.disk_dir)),
        }
    }

    /// Look up a rendered document, promoting a disk hit into memory.
    pub async fn get_rendered(&self, key: ContentKey) -> Option<Arc<RenderedDocument>> {
        if let Some(doc) = self.rendered.get(&key) {
            tracing::debug!(%key, "rendered cache hit (memory)");
            return Some(doc);
        }

        let disk = self.disk.as_ref()?;
        let doc = Arc::new(disk.read_rendered(key).await?);
        tracing::debug!(%key, "rendered cache hit (disk)");
        self.headings.insert(key, Arc::new(doc.headings.clone()));
        self.rendered.insert(key, Arc::clone(&doc));
        Some(doc)
    }

    /// Store a rendered document in both tiers.
    ///
    /// The heading half is mirrored into the heading cache before the
    /// rendered entry becomes visible, so no reader can see a rendered hit
    /// whose headings are absent. The disk write is fire-and-forget: it
    /// runs on a spawned task (callers must be inside a Tokio runtime) and
    /// a failure is logged and costs nothing but a future miss.
    pub fn put_rendered(&self, key: ContentKey, doc: Arc<RenderedDocument>) {
        self.headings.insert(key, Arc::new(doc.headings.clone()));
        self.rendered.insert(key, Arc::clone(&doc));

        if let Some(disk) = &self.disk {
            let disk = disk.clone();
            tokio::spawn(async move {
                if let Err(e) = disk.write_rendered(key, &doc).await {
                    tracing::warn!(%key, error = %e, "disk cache write failed");
                }
            });
        }
    }

    /// Look up a heading list, promoting a disk hit into memory.
    pub async fn get_headings(&self, key: ContentKey) -> Option<Arc<Vec<Heading>>> {
        if let Some(headings) = self.headings.get(&key) {
            tracing::debug!(%key, "heading cache hit (memory)");
            return Some(headings);
        }

        let disk = self.disk.as_ref()?;
        let headings = Arc::new(disk.read_headings(key).await?);
        tracing::debug!(%key, "heading cache hit (disk)");
        self.headings.insert(key, Arc::clone(&headings));
        Some(headings)
    }

    /// Store a heading list in both tiers (disk write fire-and-forget).
    pub fn put_headings(&self, key: ContentKey, headings: Arc<Vec<Heading>>) {
        self.headings.insert(key, Arc::clone(&headings));

        if let Some(disk) = &self.disk {
            let disk = disk.clone();
            tokio::spawn(async move {
                if let Err(e) = disk.write_headings(key, &headings).await {
                    tracing::warn!(%key, error = %e, "disk cache write failed");
                }
            });
        }
    }

    /// Drop every in-memory entry. Disk files stay; the next lookup reloads
    /// from there.
    pub fn clear(&self) {
        self.rendered.clear();
        self.headings.clear();
    }

    /// Entries currently held in the in-memory rendered tier.
    pub fn memory_len(&self) -> usize {
        self.rendered.len()
    }
}
