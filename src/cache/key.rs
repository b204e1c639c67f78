//! Content-addressed cache keys.

use crate::document::SyntaxMode;

/// A 256-bit content fingerprint (blake3 output) plus syntax mode.
///
/// Computed over the *entire* raw text — never a truncated prefix — so two
/// documents sharing a long common prefix can never collide. The syntax
/// mode participates as a domain tag because the same text renders
/// differently under the two modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey([u8; 32]);

impl ContentKey {
    /// Fingerprint raw text under a syntax mode.
    pub fn compute(text: &str, mode: SyntaxMode) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(text.as_bytes());
        hasher.update(match mode {
            SyntaxMode::Markdown => b"md",
            SyntaxMode::ExtendedMdx => b"mx",
        });
        Self(*hasher.finalize().as_bytes())
    }

    /// Hex form; also the disk tier's file stem.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    #[allow(dead_code)]
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        bytes.try_into().ok().map(Self)
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars are plenty for log lines.
        write!(f, "{}", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_input_same_key() {
        let a = ContentKey::compute("# Hello", SyntaxMode::Markdown);
        let b = ContentKey::compute("# Hello", SyntaxMode::Markdown);
        assert_eq!(a, b);
    }

    #[test]
    fn test_mode_is_part_of_the_key() {
        let md = ContentKey::compute("# Hello", SyntaxMode::Markdown);
        let mdx = ContentKey::compute("# Hello", SyntaxMode::ExtendedMdx);
        assert_ne!(md, mdx);
    }

    #[test]
    fn test_shared_prefix_discriminates() {
        let prefix = "x".repeat(200);
        let a = ContentKey::compute(&format!("{prefix}alpha"), SyntaxMode::Markdown);
        let b = ContentKey::compute(&format!("{prefix}beta"), SyntaxMode::Markdown);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_roundtrip() {
        let key = ContentKey::compute("content", SyntaxMode::Markdown);
        assert_eq!(ContentKey::from_hex(&key.to_hex()), Some(key));
        assert_eq!(key.to_hex().len(), 64);
    }

    #[test]
    fn test_display_is_short() {
        let key = ContentKey::compute("content", SyntaxMode::Markdown);
        assert_eq!(format!("{key}").len(), 16);
    }
}
