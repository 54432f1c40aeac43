//! Recap errors.

use sheetwright_domain::BuildError;

use crate::infrastructure::ports::SourceError;

/// Errors that can occur while producing a recap.
#[derive(Debug, thiserror::Error)]
pub enum RecapError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Reference data the sheet needs is missing from the rule book
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}
