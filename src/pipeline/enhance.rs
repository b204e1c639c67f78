//! Code presentation containers.
//!
//! Pure decoration: wraps block code in a labelled container with a copy
//! affordance and tags inline code with a marker class. Text content is
//! never altered here — the inner HTML arrives already highlighted (or
//! escaped) from the highlight stage.

use crate::utils::html::{escape, escape_attr};

/// Wrap a highlighted (or plain) code block.
///
/// With a language: container carries `data-language`, a header with the
/// language label and a copy button, and the `<code>` element gets the
/// conventional `language-*` class. The generic fallback omits the label
/// but keeps the copy affordance.
pub fn code_container(inner: &str, language: Option<&str>) -> String {
    match language {
        Some(lang) => {
            let lang = escape_attr(lang);
            format!(
                concat!(
                    r#"<div class="code-block" data-language="{lang}">"#,
                    r#"<div class="code-block-header">"#,
                    r#"<span class="code-block-lang">{lang}</span>"#,
                    r#"<button class="code-block-copy" type="button" aria-label="Copy code">Copy</button>"#,
                    r#"</div>"#,
                    r#"<pre><code class="language-{lang}">{inner}</code></pre>"#,
                    r#"</div>"#,
                ),
                lang = lang,
                inner = inner,
            )
        }
        None => format!(
            concat!(
                r#"<div class="code-block">"#,
                r#"<div class="code-block-header">"#,
                r#"<button class="code-block-copy" type="button" aria-label="Copy code">Copy</button>"#,
                r#"</div>"#,
                r#"<pre><code>{inner}</code></pre>"#,
                r#"</div>"#,
            ),
            inner = inner,
        ),
    }
}

/// Inline code (outside `<pre>`) with its marker class; text is escaped.
pub fn inline_code(text: &str) -> String {
    format!(r#"<code class="code-inline">{}</code>"#, escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_with_language() {
        let html = code_container("let x;", Some("rust"));
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains(r#"<span class="code-block-lang">rust</span>"#));
        assert!(html.contains(r#"<code class="language-rust">let x;</code>"#));
        assert!(html.contains("code-block-copy"));
    }

    #[test]
    fn test_container_without_language() {
        let html = code_container("data", None);
        assert!(!html.contains("data-language"));
        assert!(!html.contains("code-block-lang"));
        assert!(html.contains("code-block-copy"));
        assert!(html.contains("<pre><code>data</code></pre>"));
    }

    #[test]
    fn test_language_is_attribute_escaped() {
        let html = code_container("x", Some("c\"><script"));
        assert!(!html.contains("\"><script"));
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            inline_code("a < b"),
            r#"<code class="code-inline">a &lt; b</code>"#
        );
    }
}
