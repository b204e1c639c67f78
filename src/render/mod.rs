//! Render coordination.
//!
//! The public entry point over the whole core: compute the content key,
//! consult the cache, and on a miss run the transform pipeline and heading
//! extractor concurrently before storing both results under the same key.
//! There is no state machine here — the only state that matters is cache
//! presence.

mod stats;

pub use stats::RenderStats;

use std::sync::Arc;

use crate::cache::{ContentKey, RenderCache};
use crate::config::RenderConfig;
use crate::document::{Heading, RenderedDocument, SyntaxMode};
use crate::heading::extract_headings;
use crate::pipeline::{self, CodeHighlighter};

/// Fallback body served when the pipeline fails outright. Should not occur
/// in normal operation; the rest of the response (headings included) still
/// renders.
const ERROR_NOTICE_HTML: &str =
    r#"<div class="render-error"><p>This content could not be fully processed.</p></div>"#;

/// Public entry point: render documents through the two-tier cache.
pub struct RenderCoordinator {
    config: Arc<RenderConfig>,
    cache: Arc<RenderCache>,
    stats: RenderStats,
}

impl RenderCoordinator {
    /// Coordinator with its own cache built from `config.cache`.
    pub fn new(config: RenderConfig) -> Self {
        let cache = Arc::new(RenderCache::new(&config.cache));
        Self::with_cache(config, cache)
    }

    /// Coordinator over an injected cache instance (shared across
    /// coordinators, or a fresh one per test).
    pub fn with_cache(config: RenderConfig, cache: Arc<RenderCache>) -> Self {
        Self {
            config: Arc::new(config),
            cache,
            stats: RenderStats::default(),
        }
    }

    /// Render a document, serving from cache when possible.
    ///
    /// On a hit the cached value is returned as-is, no side effects. On a
    /// miss the transform runs on the blocking pool while headings are
    /// extracted from the raw text concurrently; the joined pair is stored
    /// under the content key and returned. A pipeline-fatal error degrades
    /// to an error-notice body (uncached, so a later request retries)
    /// rather than failing the request.
    pub async fn render_document(&self, text: &str, mode: SyntaxMode) -> Arc<RenderedDocument> {
        let key = ContentKey::compute(text, mode);

        if let Some(doc) = self.cache.get_rendered(key).await {
            self.stats.record_cache_hit();
            return doc;
        }

        self.stats.record_render();
        let highlighter = CodeHighlighter::global().await;

        let config = Arc::clone(&self.config);
        let owned = text.to_owned();
        let transform =
            tokio::task::spawn_blocking(move || pipeline::render(&owned, mode, &config, highlighter));
        let headings = extract_headings(text);

        let html = match transform.await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                tracing::error!(%key, error = %e, "pipeline failed, serving error notice");
                return Arc::new(RenderedDocument {
                    html: ERROR_NOTICE_HTML.to_string(),
                    headings,
                });
            }
            Err(e) => {
                tracing::error!(%key, error = %e, "render task panicked, serving error notice");
                return Arc::new(RenderedDocument {
                    html: ERROR_NOTICE_HTML.to_string(),
                    headings,
                });
            }
        };

        let doc = Arc::new(RenderedDocument { html, headings });
        self.cache.put_rendered(key, Arc::clone(&doc));
        doc
    }

    /// Heading list only — what navigation needs — without paying for a
    /// full render. Keyed identically to the rendered cache (mode included)
    /// so the two caches share one keyspace.
    pub async fn document_headings(&self, text: &str, mode: SyntaxMode) -> Arc<Vec<Heading>> {
        let key = ContentKey::compute(text, mode);

        if let Some(headings) = self.cache.get_headings(key).await {
            return headings;
        }

        let headings = Arc::new(extract_headings(text));
        self.cache.put_headings(key, Arc::clone(&headings));
        headings
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_only_config(max_entries: usize) -> RenderConfig {
        RenderConfig {
            cache: crate::config::CacheConfig {
                max_memory_entries: max_entries,
                disk: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let text = "# Title\n\nbody `code`\n";

        let first = coordinator.render_document(text, SyntaxMode::Markdown).await;
        let second = coordinator.render_document(text, SyntaxMode::Markdown).await;

        assert_eq!(first, second);
        assert_eq!(coordinator.stats().renders(), 1);
        assert_eq!(coordinator.stats().cache_hits(), 1);
    }

    #[tokio::test]
    async fn test_determinism_across_cache_clears() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let text = "# One\n\n```js {1}\nlet a = 1;\n```\n\n## Two\n";

        let first = coordinator.render_document(text, SyntaxMode::Markdown).await;
        coordinator.cache().clear();
        let second = coordinator.render_document(text, SyntaxMode::Markdown).await;

        assert_eq!(coordinator.stats().renders(), 2);
        assert_eq!(first.html, second.html);
        assert_eq!(first.headings, second.headings);
    }

    #[tokio::test]
    async fn test_shared_prefix_documents_do_not_collide() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let prefix = "intro text ".repeat(20);
        let a = format!("{prefix}\n\n# Alpha\n");
        let b = format!("{prefix}\n\n# Beta\n");

        let doc_a = coordinator.render_document(&a, SyntaxMode::Markdown).await;
        let doc_b = coordinator.render_document(&b, SyntaxMode::Markdown).await;

        assert_eq!(coordinator.stats().renders(), 2);
        assert_ne!(doc_a.html, doc_b.html);
        assert!(doc_a.html.contains("Alpha"));
        assert!(doc_b.html.contains("Beta"));
    }

    #[tokio::test]
    async fn test_rendered_headings_match_html_anchors() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let text = "# Intro\n\n```\n# not one\n```\n\n## Intro\n";

        let doc = coordinator.render_document(text, SyntaxMode::Markdown).await;
        let ids: Vec<_> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["intro", "intro-1"]);
        for heading in &doc.headings {
            assert!(doc.html.contains(&format!("id=\"{}\"", heading.id)));
        }
    }

    #[tokio::test]
    async fn test_document_headings_cached() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let text = "# A\n## B\n";

        let first = coordinator.document_headings(text, SyntaxMode::Markdown).await;
        let second = coordinator.document_headings(text, SyntaxMode::Markdown).await;

        assert_eq!(first.len(), 2);
        // Cached: same allocation comes back.
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_render_feeds_heading_cache() {
        let coordinator = RenderCoordinator::new(memory_only_config(8));
        let text = "# Only\n";

        coordinator.render_document(text, SyntaxMode::Markdown).await;
        let headings = coordinator.document_headings(text, SyntaxMode::Markdown).await;
        assert_eq!(headings[0].id, "only");
    }

    #[tokio::test]
    async fn test_eviction_never_breaks_recent_lookups() {
        let coordinator = RenderCoordinator::new(memory_only_config(4));
        for n in 0..12 {
            let text = format!("# Doc {n}\n");
            let doc = coordinator.render_document(&text, SyntaxMode::Markdown).await;
            assert!(doc.html.contains(&format!("Doc {n}")));
        }
        // An evicted key recomputes correctly rather than failing.
        let doc = coordinator.render_document("# Doc 0\n", SyntaxMode::Markdown).await;
        assert!(doc.html.contains("Doc 0"));
    }

    #[test]
    fn test_error_notice_shape() {
        assert!(ERROR_NOTICE_HTML.starts_with(r#"<div class="render-error">"#));
        assert!(ERROR_NOTICE_HTML.contains("could not be fully processed"));
    }
}
