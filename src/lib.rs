//! docpipe - the markdown rendering core of a documentation site.
//!
//! Raw markdown/MDX text in, rendered HTML plus a heading list out, behind
//! a two-tier (memory + disk) content-addressed cache. The HTTP router,
//! auth layer, progress store, and content loader are external
//! collaborators; this crate neither knows about sessions nor touches the
//! network.
//!
//! # Modules
//!
//! - [`render`] - `RenderCoordinator`, the public entry point
//! - [`pipeline`] - parse → slug → highlight → enhance → serialize
//! - [`heading`] - raw-text heading extraction and the shared slug scheme
//! - [`cache`] - `RenderCache`: two caches × two tiers, blake3 keys
//! - [`meta`] - frontmatter splitting (`DocMeta`)
//! - [`config`] - TOML-loadable `RenderConfig`
//!
//! # Example
//!
//! ```no_run
//! use docpipe::{RenderConfig, RenderCoordinator, SyntaxMode};
//!
//! # async fn example() {
//! let coordinator = RenderCoordinator::new(RenderConfig::default());
//! let doc = coordinator
//!     .render_document("# Hello\n\nworld", SyntaxMode::Markdown)
//!     .await;
//! assert!(doc.html.contains("<h1"));
//! assert_eq!(doc.headings[0].id, "hello");
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod heading;
pub mod meta;
pub mod pipeline;
pub mod render;

mod utils;

// Re-export commonly used types at crate root
pub use cache::{ContentKey, RenderCache};
pub use config::{CacheConfig, ConfigError, HighlightConfig, MarkdownConfig, RenderConfig};
pub use document::{Heading, RenderedDocument, SyntaxMode};
pub use error::RenderError;
pub use heading::{extract_headings, slugify};
pub use meta::{DocMeta, extract_frontmatter};
pub use pipeline::CodeHighlighter;
pub use render::{RenderCoordinator, RenderStats};
