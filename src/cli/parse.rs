//! CLI parse: clap types for serie. No behavior; definitions only.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// serie - track progress through numbered series with empty sentinel files
#[derive(Parser, Debug)]
#[command(name = "serie")]
#[command(about = "Track progress through numbered series using empty sentinel files")]
pub struct Cli {
    /// Directory holding the sentinel files
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub invocation: Invocation,
}

/// What to do with the tracked directory
#[derive(Args, Debug, Clone)]
pub struct Invocation {
    /// Print the planned sentinel changes instead of applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    pub format: PlanFormat,

    /// Commands, applied left to right: `7`, `3-5s`, `show_e12`, `s01~SUB01`, `text`, `html`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Json,
}
