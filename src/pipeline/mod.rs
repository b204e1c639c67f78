//! Markdown/MDX to HTML transform pipeline.
//!
//! Stages, strictly ordered over the pulldown-cmark event stream:
//!
//! 1. Parse with the configured GFM extensions
//! 2. Assign heading anchors (shared slug algorithm with the extractor)
//! 3. Highlight fenced code (`fence` + `highlight`), wrap it (`enhance`)
//! 4. Lower component tags in ExtendedMdx mode (`mdx`)
//! 5. Serialize via `pulldown_cmark::html::push_html`
//!
//! Raw HTML embedded in the source passes through verbatim. A code block
//! whose grammar fails degrades to plain text; nothing here fails the
//! overall render for malformed input.

pub mod fence;
pub mod highlight;

mod enhance;
mod mdx;

pub use highlight::CodeHighlighter;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd, html};

use crate::config::RenderConfig;
use crate::document::SyntaxMode;
use crate::error::RenderError;
use crate::heading::{SlugCounter, slugify};
use fence::FenceInfo;

/// Render raw markdown/MDX to an HTML string.
///
/// Deterministic for a fixed `(text, mode, config)`; this is what makes the
/// content-addressed cache sound.
pub fn render(
    text: &str,
    mode: SyntaxMode,
    config: &RenderConfig,
    highlighter: &CodeHighlighter,
) -> Result<String, RenderError> {
    let events: Vec<Event<'_>> =
        Parser::new_ext(text, config.markdown.to_pulldown_options()).collect();
    let transformed = transform(events, mode, config, highlighter);

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, transformed.into_iter());
    Ok(out)
}

/// One pass over the event stream applying heading, code, and MDX stages.
fn transform<'a>(
    events: Vec<Event<'a>>,
    mode: SyntaxMode,
    config: &RenderConfig,
    highlighter: &CodeHighlighter,
) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut slugs = SlugCounter::new();

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let assigned = match id {
                    Some(explicit) => slugs.assign(explicit),
                    None => slugs.assign(&slugify(&heading_text(&events[i + 1..]))),
                };
                out.push(Event::Start(Tag::Heading {
                    level: *level,
                    id: Some(CowStr::from(assigned)),
                    classes: classes.clone(),
                    attrs: attrs.clone(),
                }));
                i += 1;
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => FenceInfo::parse(info),
                    CodeBlockKind::Indented => FenceInfo::default(),
                };

                // Collect the block's text up to the closing event.
                let mut code = String::new();
                let mut j = i + 1;
                while j < events.len() {
                    match &events[j] {
                        Event::Text(t) => code.push_str(t),
                        Event::End(TagEnd::CodeBlock) => break,
                        _ => {}
                    }
                    j += 1;
                }

                let block = render_code_block(&code, &info, config, highlighter);
                out.push(Event::Html(CowStr::from(block)));
                i = j + 1;
            }
            Event::Code(text) => {
                out.push(Event::InlineHtml(CowStr::from(enhance::inline_code(text))));
                i += 1;
            }
            Event::Html(raw) if mode == SyntaxMode::ExtendedMdx => {
                out.push(Event::Html(CowStr::from(
                    mdx::lower_components(raw).into_owned(),
                )));
                i += 1;
            }
            Event::InlineHtml(raw) if mode == SyntaxMode::ExtendedMdx => {
                out.push(Event::InlineHtml(CowStr::from(
                    mdx::lower_components(raw).into_owned(),
                )));
                i += 1;
            }
            _ => {
                out.push(events[i].clone());
                i += 1;
            }
        }
    }

    out
}

/// Concatenate the text content of a heading from its inner events.
fn heading_text(rest: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in rest {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

/// Highlight and wrap one code block; degrades per block, never fails.
fn render_code_block(
    code: &str,
    info: &FenceInfo,
    config: &RenderConfig,
    highlighter: &CodeHighlighter,
) -> String {
    let Some(lang) = info.language.as_deref() else {
        return enhance::code_container(&highlight::plain_block(code, &info.marked), None);
    };

    let Some(syntax) = highlighter.syntax_for(lang) else {
        tracing::debug!(language = lang, "no grammar for fence language, rendering plain");
        return enhance::code_container(&highlight::plain_block(code, &info.marked), None);
    };

    let inner = highlighter
        .highlight_block(code, syntax, &config.highlight.theme, &info.marked)
        .unwrap_or_else(|e| {
            tracing::warn!(
                language = lang,
                error = %e,
                "highlighting failed, falling back to plain text"
            );
            highlight::plain_block(code, &info.marked)
        });
    enhance::code_container(&inner, Some(lang))
}
