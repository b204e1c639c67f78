//! Anchor slug derivation.
//!
//! The slug algorithm is shared verbatim between the raw-text heading
//! extractor and the pipeline's heading pass; both sides must produce the
//! same ids for in-page anchor links to resolve.

use rustc_hash::FxHashMap;

/// Derive a URL-safe anchor slug from heading text.
///
/// Lower-cases the title, strips characters that are not word characters,
/// hyphens, or spaces, collapses each whitespace run into a single hyphen,
/// and trims leading/trailing hyphens.
///
/// # Example
/// ```
/// use docpipe::heading::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("API Reference (v2)"), "api-reference-v2");
/// ```
pub fn slugify(title: &str) -> String {
    let filtered: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

/// Per-document slug disambiguator.
///
/// Tracks every id handed out for one document and resolves collisions by
/// appending `-1`, `-2`, … in encounter order.
#[derive(Debug, Default)]
pub struct SlugCounter {
    /// id -> highest numeric suffix handed out for that base.
    seen: FxHashMap<String, usize>,
}

impl SlugCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique id for `base`, suffixing until unused.
    ///
    /// `base` is taken as-is; callers slugify first (or pass an explicit
    /// `{#id}` attribute through unchanged).
    pub fn assign(&mut self, base: &str) -> String {
        if !self.seen.contains_key(base) {
            self.seen.insert(base.to_owned(), 0);
            return base.to_owned();
        }

        let mut n = self.seen[base];
        loop {
            n += 1;
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(base.to_owned(), n);
                self.seen.insert(candidate.clone(), 0);
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Test-123"), "test-123");
        assert_eq!(slugify("foo_bar"), "foo_bar");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Trailing punctuation!"), "trailing-punctuation");
        assert_eq!(slugify("  padded  "), "padded");
    }

    #[test]
    fn test_slugify_strips_markup_leftovers() {
        // Emphasis markers are not word characters, so they vanish here.
        assert_eq!(slugify("**Bold** title"), "bold-title");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_counter_suffixes_in_order() {
        let mut counter = SlugCounter::new();
        assert_eq!(counter.assign("intro"), "intro");
        assert_eq!(counter.assign("intro"), "intro-1");
        assert_eq!(counter.assign("intro"), "intro-2");
        assert_eq!(counter.assign("other"), "other");
    }

    #[test]
    fn test_counter_skips_taken_candidates() {
        let mut counter = SlugCounter::new();
        // An explicit id can occupy a candidate slot up front.
        assert_eq!(counter.assign("setup-1"), "setup-1");
        assert_eq!(counter.assign("setup"), "setup");
        assert_eq!(counter.assign("setup"), "setup-2");
    }
}
