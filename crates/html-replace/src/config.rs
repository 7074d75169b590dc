//! Replacement configuration.
//!
//! Parsed from TOML with serde; every field has a default, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! mode = "fragment"
//! trim = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// How the input markup is parsed and which element is traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Full document; the children of `<body>` are traversed.
    #[default]
    Document,
    /// Fragment; the children of the fragment root are traversed.
    Fragment,
}

/// Options for [`HtmlReplacer`](crate::HtmlReplacer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceConfig {
    /// Parsing mode.
    pub mode: ParseMode,
    /// Trim leading and trailing whitespace of the output.
    pub trim: bool,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Document,
            trim: true,
        }
    }
}

impl ReplaceConfig {
    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed or contains
    /// unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist, or an I/O
    /// or parse error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded replace config from {}", path.display());
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
