//! serie: Series Tracking With Sentinel Files
//!
//! Progress through numbered series (episodes, chapters, issues) is stored
//! entirely in the names of empty files. Each run discovers those files,
//! applies command tokens to the decoded state, and renames the sentinels
//! so the filesystem matches the new state.

pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod fs;
pub mod grammar;
pub mod logging;
pub mod namespace;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod session;
pub mod state;
pub mod walker;

pub use error::{Result, SerieError};
pub use session::Serie;
