//! CLI route: run context and dispatch to the tracking session.

use crate::cli::parse::{Invocation, PlanFormat};
use crate::cli::presentation::{format_plan_json, format_plan_text};
use crate::config::{ConfigLoader, SerieConfig};
use crate::console::StdConsole;
use crate::error::{Result, SerieError};
use crate::fs::OsFs;
use crate::session::Serie;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: tracked directory and loaded config.
pub struct RunContext {
    root: PathBuf,
    config: SerieConfig,
}

impl RunContext {
    /// Create run context from the tracked directory and optional config path.
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(root, config)
    }

    pub fn with_config(root: PathBuf, config: SerieConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(SerieError::ConfigError(format!(
                "Not a directory: {}",
                root.display()
            )));
        }
        let root = dunce::canonicalize(&root).map_err(|e| SerieError::fs(&root, e))?;
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SerieConfig {
        &self.config
    }

    /// Run the invocation. Returns text to print on stdout, if any; the
    /// text report itself is written straight to the console.
    pub fn execute(&self, invocation: &Invocation) -> Result<Option<String>> {
        let console = StdConsole::new(self.config.report.color);
        let mut serie =
            Serie::new(OsFs::new(&self.root), console).with_report(self.config.report.clone());

        if invocation.dry_run {
            let plan = serie.plan(&invocation.tokens)?;
            let output = match invocation.format {
                PlanFormat::Text => format_plan_text(&plan),
                PlanFormat::Json => format_plan_json(&plan)?,
            };
            return Ok(Some(output));
        }

        let summary = serie.run(&invocation.tokens)?;
        info!(
            root = %self.root.display(),
            created = summary.created,
            deleted = summary.deleted,
            kept = summary.kept,
            "Run complete"
        );
        Ok(None)
    }
}
