//! Dashboard configuration file

use anyhow::{Context, Result};
use sales_forecast::PipelineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Read when no `--config` is given and the file exists
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling log files
    pub directory: PathBuf,
    pub file_name: String,
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "sales-dashboard.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `path`, or `dashboard.toml` if present, or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.pipeline.validate()?;
        Ok(config)
    }
}
