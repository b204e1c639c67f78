//! Extended-MDX component lowering.
//!
//! In [`SyntaxMode::ExtendedMdx`](crate::document::SyntaxMode) raw-HTML
//! events whose tag name is capitalized are treated as embedded components
//! rather than literal markup: `<Callout kind="tip">…</Callout>` lowers to
//! a `div` carrying `data-component="Callout"`, attributes passed through.
//! Lowercase tags and everything else in the event are left untouched, so
//! hand-written HTML keeps rendering verbatim.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `<Name attrs>` / `</Name>` / `<Name attrs/>` with a capitalized name.
static COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Z][A-Za-z0-9]*)([^>]*?)(/?)>").unwrap());

/// Rewrite component-like tags inside one raw-HTML event.
pub fn lower_components(html: &str) -> Cow<'_, str> {
    COMPONENT_TAG.replace_all(html, |caps: &Captures| {
        let closing = !caps[1].is_empty();
        let name = &caps[2];
        let attrs = &caps[3];
        let self_closing = !caps[4].is_empty();

        if closing {
            "</div>".to_string()
        } else if self_closing {
            format!(r#"<div data-component="{name}"{attrs}></div>"#)
        } else {
            format!(r#"<div data-component="{name}"{attrs}>"#)
        }
    })
}
