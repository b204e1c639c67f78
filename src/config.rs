//! Renderer configuration.
//!
//! Three sections, all optional with sensible defaults:
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[markdown]`  | Parser extensions (tables, footnotes, …)         |
//! | `[cache]`     | Memory bound and on-disk tier location           |
//! | `[highlight]` | syntect theme for fenced code blocks             |

use std::path::{Path, PathBuf};

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Root configuration for the rendering core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Markdown parser extensions.
    pub markdown: MarkdownConfig,
    /// Cache sizing and placement.
    pub cache: CacheConfig,
    /// Code highlighting settings.
    pub highlight: HighlightConfig,
}

impl RenderConfig {
    /// Parse from TOML text and validate.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.max_memory_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_memory_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Markdown parser extensions (GFM set plus heading attributes).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable tables extension.
    pub tables: bool,
    /// Enable footnotes extension.
    pub footnotes: bool,
    /// Enable strikethrough extension.
    pub strikethrough: bool,
    /// Enable task lists extension.
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`).
    pub heading_attributes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }
}

impl MarkdownConfig {
    /// Convert to pulldown-cmark Options.
    pub(crate) fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Cache sizing and placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries per in-memory cache before bulk eviction.
    pub max_memory_entries: usize,
    /// Enable the on-disk tier.
    pub disk: bool,
    /// Directory for the on-disk tier.
    pub disk_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_memory_entries: 256,
            disk: true,
            disk_dir: PathBuf::from(".docpipe/cache"),
        }
    }
}

/// Code highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name; unknown names fall back to the default theme.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_string(),
        }
    }
}
