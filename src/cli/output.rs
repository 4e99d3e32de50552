//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, TreeError};

/// Map domain errors to a string for CLI output, with a hint where one helps.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Tree(TreeError::EmptyInput) => {
            format!("{}\nHint: the root contains no files matching the crawler filters.", e)
        }
        ApiError::Tree(TreeError::StructuralMismatch { .. }) => format!(
            "{}\nHint: only snapshots taken with the same leaf ordering can be compared.",
            e
        ),
        _ => e.to_string(),
    }
}
