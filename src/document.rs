//! Core document types shared across the rendering pipeline and caches.

use serde::{Deserialize, Serialize};

/// How the raw text should be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxMode {
    /// Plain markdown with GFM extensions.
    #[default]
    Markdown,
    /// Markdown plus embedded component-like tags (`<Callout>…</Callout>`),
    /// which are lowered to structural nodes instead of opaque literal HTML.
    ExtendedMdx,
}

/// A heading extracted from a document, in document order.
///
/// `id` is the anchor assigned to the corresponding element in the rendered
/// HTML; uniqueness within one document is guaranteed by numeric suffixing
/// in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// URL-safe anchor id, unique within the document.
    pub id: String,
    /// Display text with inline markup stripped.
    pub title: String,
    /// Heading level (1..=6).
    pub level: u8,
}

/// The output of a full render: HTML plus the document's heading list.
///
/// Immutable once produced; shared across concurrent readers as
/// `Arc<RenderedDocument>`. The heading list always travels with the HTML so
/// a cache reader can never observe one without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Serialized HTML body.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_mode_serde() {
        assert_eq!(
            serde_json::to_string(&SyntaxMode::ExtendedMdx).unwrap(),
            "\"extendedmdx\""
        );
        let mode: SyntaxMode = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(mode, SyntaxMode::Markdown);
    }

    #[test]
    fn test_rendered_document_roundtrip() {
        let doc = RenderedDocument {
            html: "<h1 id=\"intro\">Intro</h1>".to_string(),
            headings: vec![Heading {
                id: "intro".to_string(),
                title: "Intro".to_string(),
                level: 1,
            }],
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: RenderedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
