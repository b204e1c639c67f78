//! Frontmatter metadata extraction.
//!
//! The content loader hands each document over as raw text; this splits a
//! leading YAML-ish (`---`) or TOML (`+++`) frontmatter block off the body
//! and exposes the fields the site cares about. The pipeline itself only
//! ever sees the body.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Frontmatter-derived document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocMeta {
    /// Document title.
    pub title: Option<String>,
    /// Short description for listings and meta tags.
    pub description: Option<String>,
    /// Position within the section's navigation.
    pub order: Option<i64>,
    /// Section this document belongs to.
    pub section: Option<String>,
    /// Viewer must be authenticated (enforced by the router, not here).
    pub requires_auth: bool,
    /// Unrecognized fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Split frontmatter off raw document text.
///
/// Returns `(metadata, body)` when a frontmatter block is found, `None`
/// when the text has none.
pub fn extract_frontmatter(content: &str) -> Result<Option<(DocMeta, &str)>> {
    match detect_frontmatter(content) {
        Some((fm, body, true)) => {
            let meta =
                toml::from_str(fm).map_err(|e| anyhow::anyhow!("invalid TOML frontmatter: {e}"))?;
            Ok(Some((meta, body)))
        }
        Some((fm, body, false)) => Ok(Some((parse_yaml_like(fm), body))),
        None => Ok(None),
    }
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    for (marker, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(marker)
            && let Some(end) = trimmed[3..].find(&format!("\n{marker}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches('\n');
            return Some((fm, body, is_toml));
        }
    }

    None
}

/// Parse simple YAML-like frontmatter (`key: value` lines).
fn parse_yaml_like(content: &str) -> DocMeta {
    let mut meta = DocMeta::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "title" => meta.title = Some(value.to_string()),
            "description" => meta.description = Some(value.to_string()),
            "order" => meta.order = value.parse().ok(),
            "section" => meta.section = Some(value.to_string()),
            "requires_auth" | "auth" => meta.requires_auth = value.eq_ignore_ascii_case("true"),
            _ => {
                // Custom field -> extra (preserve original key case).
                meta.extra.insert(key.trim().to_string(), parse_value(value));
            }
        }
    }

    meta
}

/// Best-effort scalar typing for YAML-like values.
///
/// Booleans, null, integers, floats, and comma-separated arrays; anything
/// else stays a string.
fn parse_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }
    if s.contains(',') {
        return Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        );
    }
    Value::String(s.to_string())
}
