//! On-disk cache tier.
//!
//! One pair of files per content key under the cache directory:
//! `<hex>.html` (the rendered HTML, byte-for-byte) and `<hex>.toc.json`
//! (the heading list). The hex fingerprint is already filesystem-safe, and
//! content addressing means a file can only ever hold output for the exact
//! text that named it — so a half-written pair reads as a miss, never as a
//! stale combination.
//!
//! All failures here are soft: unreadable or missing files are misses,
//! write errors are the caller's to log and drop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;

use super::key::ContentKey;
use crate::document::{Heading, RenderedDocument};

#[derive(Debug, Clone)]
pub struct DiskTier {
    dir: PathBuf,
}

impl DiskTier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn html_path(&self, key: ContentKey) -> PathBuf {
        self.dir.join(format!("{}.html", key.to_hex()))
    }

    fn toc_path(&self, key: ContentKey) -> PathBuf {
        self.dir.join(format!("{}.toc.json", key.to_hex()))
    }

    /// Read a full rendered document. Requires both files of the pair.
    pub async fn read_rendered(&self, key: ContentKey) -> Option<RenderedDocument> {
        let headings = self.read_headings(key).await?;
        let html = fs::read_to_string(self.html_path(key)).await.ok()?;
        Some(RenderedDocument { html, headings })
    }

    /// Read just the heading list.
    pub async fn read_headings(&self, key: ContentKey) -> Option<Vec<Heading>> {
        let bytes = fs::read(self.toc_path(key)).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(headings) => Some(headings),
            Err(e) => {
                tracing::warn!(%key, error = %e, "discarding unreadable headings cache file");
                None
            }
        }
    }

    /// Persist a rendered document. The headings file lands first so a
    /// concurrent reader of the pair sees either nothing or both.
    pub async fn write_rendered(&self, key: ContentKey, doc: &RenderedDocument) -> Result<()> {
        self.write_headings(key, &doc.headings).await?;
        let path = self.html_path(key);
        fs::write(&path, &doc.html)
            .await
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Persist a heading list.
    pub async fn write_headings(&self, key: ContentKey, headings: &[Heading]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating cache dir {}", self.dir.display()))?;
        let json = serde_json::to_vec(headings).context("serializing headings")?;
        let path = self.toc_path(key);
        fs::write(&path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))
    }
}
