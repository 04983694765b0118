//! User preferences persisted as `config.json` in the platform config
//! directory.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::entities::document::DEFAULT_DELIMITER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub save: SaveDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDefaults {
    #[serde(default = "default_include_bom")]
    pub include_bom: bool,
    /// Used by the save dialog until a file has been opened.
    #[serde(default = "default_delimiter")]
    pub default_delimiter: char,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_include_bom() -> bool {
    true
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for SaveDefaults {
    fn default() -> Self {
        Self {
            include_bom: default_include_bom(),
            default_delimiter: default_delimiter(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            save: SaveDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, falling back to defaults when the path is
    /// unknown, missing or unreadable.
    pub fn load_from(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("no config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    config.sanitized()
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to parse config");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read config");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Only single-byte delimiters can be written.
    fn sanitized(mut self) -> Self {
        if !self.save.default_delimiter.is_ascii() {
            tracing::warn!(
                delimiter = ?self.save.default_delimiter,
                "unsupported default delimiter in config, using comma"
            );
            self.save.default_delimiter = DEFAULT_DELIMITER;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"save":{"default_delimiter":";"}}"#).expect("valid json");

        assert_eq!(config.log_level, "warn");
        assert!(config.save.include_bom);
        assert_eq!(config.save.default_delimiter, ';');
    }

    #[test]
    fn unknown_path_yields_defaults() {
        assert_eq!(AppConfig::load_from(None), AppConfig::default());
    }

    #[test]
    fn non_ascii_default_delimiter_is_replaced() {
        let mut config = AppConfig::default();
        config.save.default_delimiter = '§';

        assert_eq!(config.sanitized().save.default_delimiter, ',');
    }
}
