//! Render counters.
//!
//! Cheap process-local counters, mainly so cache behavior is observable:
//! a correct cache serves a repeated document without the render counter
//! moving.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderStats {
    renders: AtomicU64,
    cache_hits: AtomicU64,
}

impl RenderStats {
    pub(crate) fn record_render(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of actual pipeline computations performed.
    pub fn renders(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }

    /// Number of rendered-document cache hits served.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }
}
