//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;
pub mod process;

use std::path::{Path, PathBuf};

use slipscan_core::SlipscanConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slipscan")
        .join("config.json")
}

/// Path of the configuration file in use: `--config` or the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit `--config` must exist; the default file is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SlipscanConfig> {
    let path = config_file(config_path);

    if config_path.is_none() && !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(SlipscanConfig::default());
    }

    debug!("Loading config from {}", path.display());
    Ok(SlipscanConfig::from_file(&path)?)
}

/// Apply a `--model-dir` override.
pub fn with_model_dir(mut config: SlipscanConfig, model_dir: Option<&Path>) -> SlipscanConfig {
    if let Some(dir) = model_dir {
        config.models.model_dir = dir.to_path_buf();
    }
    config
}
