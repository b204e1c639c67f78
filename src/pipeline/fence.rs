//! Fence info-string parsing.
//!
//! A fence like ```` ```js {2,4-5} ```` carries a language token and an
//! optional marked-line annotation. Ranges are 1-indexed and inclusive;
//! tokens are either a single integer or a `start-end` pair. Parsing is
//! permissive — malformed tokens are dropped, never an error.

use std::ops::RangeInclusive;

/// Parsed fence info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// Language tag, if present.
    pub language: Option<String>,
    /// Lines to mark as highlighted in the rendered block.
    pub marked: MarkedLines,
}

impl FenceInfo {
    /// Parse the info string following the opening fence.
    pub fn parse(info: &str) -> Self {
        let info = info.trim();
        if info.is_empty() {
            return Self::default();
        }

        let (lang_part, range_part) = match info.find('{') {
            Some(open) => (&info[..open], info[open..].strip_prefix('{')),
            None => (info, None),
        };

        let language = lang_part.split_whitespace().next().map(str::to_owned);

        let marked = range_part
            .and_then(|rest| rest.split('}').next())
            .map(MarkedLines::parse)
            .unwrap_or_default();

        Self { language, marked }
    }
}

/// Set of 1-indexed line ranges to mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedLines(Vec<RangeInclusive<usize>>);

impl MarkedLines {
    /// Parse comma-separated `n` / `a-b` tokens; invalid tokens are skipped.
    fn parse(list: &str) -> Self {
        let ranges = list
            .split(',')
            .filter_map(|tok| {
                let tok = tok.trim();
                if let Some((start, end)) = tok.split_once('-') {
                    let start: usize = start.trim().parse().ok()?;
                    let end: usize = end.trim().parse().ok()?;
                    (start >= 1 && start <= end).then_some(start..=end)
                } else {
                    let n: usize = tok.parse().ok()?;
                    (n >= 1).then_some(n..=n)
                }
            })
            .collect();
        Self(ranges)
    }

    /// Whether the 1-indexed line falls in any marked range.
    pub fn contains(&self, line: usize) -> bool {
        self.0.iter().any(|r| r.contains(&line))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_only() {
        let info = FenceInfo::parse("rust");
        assert_eq!(info.language.as_deref(), Some("rust"));
        assert!(info.marked.is_empty());
    }

    #[test]
    fn test_empty_info() {
        let info = FenceInfo::parse("");
        assert_eq!(info.language, None);
        assert!(info.marked.is_empty());
    }

    #[test]
    fn test_language_with_ranges() {
        let info = FenceInfo::parse("js {2,4-5}");
        assert_eq!(info.language.as_deref(), Some("js"));
        assert!(info.marked.contains(2));
        assert!(!info.marked.contains(3));
        assert!(info.marked.contains(4));
        assert!(info.marked.contains(5));
        assert!(!info.marked.contains(1));
        assert!(!info.marked.contains(6));
    }

    #[test]
    fn test_ranges_without_language() {
        let info = FenceInfo::parse("{1-3}");
        assert_eq!(info.language, None);
        assert!(info.marked.contains(1));
        assert!(info.marked.contains(3));
    }

    #[test]
    fn test_malformed_tokens_are_skipped() {
        let info = FenceInfo::parse("py {2,x,9-3,4}");
        assert!(info.marked.contains(2));
        assert!(info.marked.contains(4));
        assert!(!info.marked.contains(9));
        assert!(!info.marked.contains(3));
    }

    #[test]
    fn test_zero_line_is_invalid() {
        let info = FenceInfo::parse("sh {0,1}");
        assert!(!info.marked.contains(0));
        assert!(info.marked.contains(1));
    }
}
