//! Syntax highlighting for fenced code blocks.
//!
//! Wraps syntect with a persistent per-block parse/highlight state so
//! multi-line constructs (block comments, strings) highlight correctly,
//! while still emitting output line by line — each source line becomes a
//! `<span class="line">` so marked lines can carry an extra class.
//!
//! Grammar and theme sets are loaded once per process, lazily, behind a
//! shared pending init that all concurrent first users await.

use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, Theme, ThemeSet};
use syntect::html::{IncludeBackground, append_highlighted_html_for_styled_line};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tokio::sync::OnceCell;

use super::fence::MarkedLines;
use crate::error::RenderError;
use crate::utils::html::escape;

static GLOBAL: OnceCell<CodeHighlighter> = OnceCell::const_new();

/// Process-wide syntect grammar and theme sets.
#[derive(Debug)]
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl CodeHighlighter {
    const DEFAULT_THEME: &'static str = "InspiredGitHub";

    /// Load the bundled grammar and theme definitions. Expensive; prefer
    /// [`CodeHighlighter::global`] outside of tests.
    pub fn load() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Shared process-wide instance. Concurrent first callers await a single
    /// initialization; later callers get the memoized reference.
    pub async fn global() -> &'static CodeHighlighter {
        GLOBAL
            .get_or_init(|| async {
                tokio::task::spawn_blocking(Self::load)
                    .await
                    .unwrap_or_else(|_| Self::load())
            })
            .await
    }

    /// Resolve a fence language tag to a grammar, by name or extension.
    pub fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_token(language)
    }

    fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes
            .themes
            .get(name)
            .or_else(|| self.themes.themes.get(Self::DEFAULT_THEME))
            .or_else(|| self.themes.themes.values().next())
    }

    /// Highlight one code block, returning the inner HTML for its `<code>`
    /// element: one styled `<span class="line">` per source line, with
    /// `line-highlighted` added for lines in `marked`.
    pub fn highlight_block(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &str,
        marked: &MarkedLines,
    ) -> Result<String, RenderError> {
        let theme = self
            .theme(theme)
            .ok_or_else(|| RenderError::Pipeline("no highlight theme available".to_string()))?;

        let highlighter = Highlighter::new(theme);
        let mut parse_state = ParseState::new(syntax);
        let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());

        let mut out = String::with_capacity(code.len() * 2);
        for (number, line) in LinesWithEndings::from(code).enumerate() {
            let ops = parse_state.parse_line(line, &self.syntaxes)?;
            let ranges: Vec<_> =
                HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter).collect();

            out.push_str(line_open(number + 1, marked));
            append_highlighted_html_for_styled_line(&ranges, IncludeBackground::No, &mut out)?;
            out.push_str("</span>");
        }
        Ok(out)
    }
}

/// Unhighlighted rendering: escaped text with the same per-line span
/// structure, so marked-line annotations survive the fallback.
pub fn plain_block(code: &str, marked: &MarkedLines) -> String {
    let mut out = String::with_capacity(code.len() + 16);
    for (number, line) in LinesWithEndings::from(code).enumerate() {
        out.push_str(line_open(number + 1, marked));
        out.push_str(&escape(line));
        out.push_str("</span>");
    }
    out
}

#[inline]
fn line_open(number: usize, marked: &MarkedLines) -> &'static str {
    if marked.contains(number) {
        r#"<span class="line line-highlighted">"#
    } else {
        r#"<span class="line">"#
    }
}

/// Shared instance for tests; loading defaults takes long enough that each
/// test doing its own load would dominate the suite.
#[cfg(test)]
pub(crate) static TEST_HIGHLIGHTER: std::sync::LazyLock<CodeHighlighter> =
    std::sync::LazyLock::new(CodeHighlighter::load);
