//! Configuration System
//!
//! Layered configuration for the command-line tool. Sources, lowest to
//! highest precedence: built-in defaults, the global config file (or an
//! explicit one), then `SERIE_*` environment variables using `__` as the
//! nesting separator (`SERIE_REPORT__HTML_FILE=progress.html`).
//!
//! Configuration only shapes logging and reports. Tracked state is never
//! stored here; it lives in sentinel filenames alone.

use crate::error::Result;
use crate::logging::LoggingConfig;
use config::{Config, ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerieConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// HTML report path, relative to the tracked directory
    #[serde(default = "default_html_file")]
    pub html_file: PathBuf,

    /// Color error lines on a terminal
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_html_file() -> PathBuf {
    PathBuf::from("serie.html")
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            html_file: default_html_file(),
            color: default_true(),
        }
    }
}

impl SerieConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let html_file = &self.report.html_file;
        if html_file.as_os_str().is_empty() {
            return Err("report.html_file cannot be empty".to_string());
        }
        if html_file.is_absolute() {
            return Err(format!(
                "report.html_file must be relative to the tracked directory: {}",
                html_file.display()
            ));
        }
        Ok(())
    }
}

/// Path to the global config file: `$XDG_CONFIG_HOME/serie/config.toml`
/// on Linux, the platform equivalent elsewhere.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "serie").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads [`SerieConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, environment.
    pub fn load() -> Result<SerieConfig> {
        Self::load_with(global_config_path())
    }

    /// Defaults, the given file, environment.
    pub fn load_from_file(path: &Path) -> Result<SerieConfig> {
        Self::load_with(Some(path.to_path_buf()))
    }

    fn load_with(file: Option<PathBuf>) -> Result<SerieConfig> {
        let mut builder = builder_with_defaults()?;

        if let Some(path) = file {
            if path.exists() {
                debug!(config_path = %path.display(), "Loading configuration file");
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SERIE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: SerieConfig = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(crate::error::SerieError::ConfigError)?;
        Ok(config)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("report.html_file", "serie.html")?
        .set_default("report.color", true)?)
}
