//! Heading extraction from raw markdown text.
//!
//! Scans line by line (never a full-document regex) so arbitrarily large
//! documents stream through with bounded memory. Fenced code regions are
//! tracked so a `# comment` inside a code sample is never mistaken for
//! structure. Anchor ids come from [`slug::slugify`] plus a per-document
//! collision counter — the exact algorithm the pipeline applies to heading
//! elements, so the extracted list and the rendered HTML always agree.

mod slug;

pub use slug::{SlugCounter, slugify};

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Heading;

/// Markdown link/image syntax: `[text](target)`, `![alt](target)`.
static LINK_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap());

/// Extract all headings from raw markdown, in document order.
///
/// Lines inside backtick fences are ignored. A heading line is 1–6 `#`
/// characters followed by at least one space; anything else (e.g. `#seven`
/// or a 7-`#` line) is silently skipped. Extraction never fails.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut slugs = SlugCounter::new();
    let mut in_fence = false;

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let Some((level, rest)) = parse_heading_line(line) else {
            continue;
        };

        let (rest, explicit_id) = split_trailing_attrs(rest);
        let title = clean_title(rest);
        let id = match explicit_id {
            Some(id) => slugs.assign(&id),
            None => slugs.assign(&slugify(&title)),
        };

        headings.push(Heading { id, title, level });
    }

    headings
}

/// Match `#{1,6}` + one or more spaces; returns (level, remainder).
fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim_start()))
}

/// Split off a trailing `{…}` attribute block and pull an explicit `#id`
/// out of it, mirroring pulldown-cmark's heading-attribute extension.
fn split_trailing_attrs(rest: &str) -> (&str, Option<String>) {
    let trimmed = rest.trim_end();
    if !trimmed.ends_with('}') {
        return (trimmed, None);
    }
    let Some(open) = trimmed.rfind('{') else {
        return (trimmed, None);
    };

    let attrs = &trimmed[open + 1..trimmed.len() - 1];
    let id = attrs
        .split_whitespace()
        .find_map(|tok| tok.strip_prefix('#'))
        .map(str::to_owned);

    (trimmed[..open].trim_end(), id)
}

/// Reduce inline markup to its text content: links and images collapse to
/// their label, backticks are dropped. Emphasis markers need no handling —
/// the slugger strips them as non-word characters.
fn clean_title(rest: &str) -> String {
    let without_links = LINK_SYNTAX.replace_all(rest, "$1");
    without_links.replace('`', "").trim().to_string()
}
