//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::toml_config::{EditorConfig, TomlConfigAdapter};
use crate::domain::model::AspectPreset;
use crate::error::{TrimlineError, TrimlineResult};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "trimmer.toml";

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
    pub track_width_px: Option<f64>,
    pub default_owner: Option<String>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

/// Resolve configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> TrimlineResult<EditorConfig> {
    let mut config = load_config_file(config_path)?;
    apply_environment(&mut config, |key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut config, overrides);
    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

/// An explicit path must exist; the implicit one is optional
fn load_config_file(config_path: Option<&Path>) -> TrimlineResult<EditorConfig> {
    match config_path {
        Some(path) => TomlConfigAdapter::load(path),
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            if implicit.exists() {
                TomlConfigAdapter::load(implicit)
            } else {
                info!("No config file found, using defaults");
                Ok(EditorConfig::default())
            }
        }
    }
}

/// Apply `TRIMX_*` variables read through `lookup`
pub fn apply_environment(
    config: &mut EditorConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> TrimlineResult<()> {
    let mut applied = 0;

    if let Some(value) = lookup("TRIMX_CATALOG") {
        config.catalog_path = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_STORE_DIR") {
        config.store_dir = PathBuf::from(value);
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_STORE_QUOTA") {
        config.store_quota = Some(parse_env("TRIMX_STORE_QUOTA", &value)?);
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_TRACK_WIDTH") {
        config.track_width_px = parse_env("TRIMX_TRACK_WIDTH", &value)?;
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_DEFAULT_ASPECT") {
        config.default_aspect = parse_env::<AspectPreset>("TRIMX_DEFAULT_ASPECT", &value)?;
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_DEFAULT_OWNER") {
        config.default_owner = value;
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_LOG_LEVEL") {
        config.logging.level = value;
        applied += 1;
    }
    if let Some(value) = lookup("TRIMX_LOG_JSON") {
        config.logging.json = parse_env("TRIMX_LOG_JSON", &value)?;
        applied += 1;
    }

    if applied > 0 {
        info!("Applied {} environment variable overrides", applied);
    }
    Ok(())
}

/// Apply command-line overrides on top of everything else
pub fn apply_cli_overrides(config: &mut EditorConfig, overrides: &ConfigOverrides) {
    if let Some(path) = &overrides.catalog_path {
        config.catalog_path = path.clone();
    }
    if let Some(dir) = &overrides.store_dir {
        config.store_dir = dir.clone();
    }
    if let Some(width) = overrides.track_width_px {
        config.track_width_px = width;
    }
    if let Some(owner) = &overrides.default_owner {
        config.default_owner = owner.clone();
    }
    if let Some(level) = &overrides.log_level {
        config.logging.level = level.clone();
    }
    if overrides.log_json {
        config.logging.json = true;
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> TrimlineResult<T> {
    value.trim().parse().map_err(|_| TrimlineError::ConfigError {
        message: format!("Invalid value for {}: {}", key, value),
    })
}
