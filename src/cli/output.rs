//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SerieError;

/// Map domain errors to the line printed on stderr before exiting.
pub fn map_error(e: &SerieError) -> String {
    match e {
        SerieError::SelectorParse(_) | SerieError::NamespaceName { .. } => e.to_string(),
        _ => format!("serie: {}", e),
    }
}
