// TOML config adapter - Editor configuration loaded from TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::model::AspectPreset;
use crate::error::{TrimlineError, TrimlineResult};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// TOML clip catalog used for clip lookup
    pub catalog_path: PathBuf,
    /// Directory receiving committed trim records
    pub store_dir: PathBuf,
    /// Maximum number of stored records, if limited
    pub store_quota: Option<usize>,
    /// Width of the timeline track in pixels
    pub track_width_px: f64,
    /// Preset used when a clip has no aspect ratio of its own
    pub default_aspect: AspectPreset,
    /// Owner id sent when a clip record carries none
    pub default_owner: String,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "trimx_timeline=debug,warn")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.toml"),
            store_dir: PathBuf::from("trims"),
            store_quota: None,
            track_width_px: 800.0,
            default_aspect: AspectPreset::default(),
            default_owner: "default-user".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EditorConfig {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> TrimlineResult<()> {
        if !(self.track_width_px.is_finite() && self.track_width_px > 0.0) {
            return Err(TrimlineError::ConfigError {
                message: format!("track_width_px must be positive, got {}", self.track_width_px),
            });
        }
        if self.default_owner.trim().is_empty() {
            return Err(TrimlineError::ConfigError {
                message: "default_owner cannot be empty".to_string(),
            });
        }
        if self.store_quota == Some(0) {
            return Err(TrimlineError::ConfigError {
                message: "store_quota must be at least 1 when set".to_string(),
            });
        }
        let level = self.logging.level.to_lowercase();
        let known = ["trace", "debug", "info", "warn", "error"];
        if !level.contains('=') && !known.contains(&level.as_str()) {
            return Err(TrimlineError::ConfigError {
                message: format!(
                    "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                    self.logging.level
                ),
            });
        }
        Ok(())
    }
}

/// Loads `EditorConfig` from TOML
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn parse(content: &str) -> TrimlineResult<EditorConfig> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> TrimlineResult<EditorConfig> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = TomlConfigAdapter::parse(
            r#"
            track_width_px = 1200.0
            default_aspect = "9:16"

            [logging]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.track_width_px, 1200.0);
        assert_eq!(config.default_aspect, AspectPreset::Vertical);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.default_owner, "default-user");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(TomlConfigAdapter::parse("track_width_px = 0.0").is_err());
        assert!(TomlConfigAdapter::parse("default_aspect = \"4:3\"").is_err());
        assert!(TomlConfigAdapter::parse("[logging]\nlevel = \"loud\"").is_err());
        assert!(TomlConfigAdapter::parse("store_quota = 0").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trimmer.toml");
        std::fs::write(&path, "default_owner = \"alice\"\n").unwrap();
        assert_eq!(TomlConfigAdapter::load(&path).unwrap().default_owner, "alice");
    }
}
