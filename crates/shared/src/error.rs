//! Errors for reading and writing the external JSON formats

use sheetwright_domain::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetFormatError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported sheet format version {found} (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Parsed fine but breaks a build rule or references unknown data
    #[error("Rejected: {0}")]
    Rejected(#[from] BuildError),
}

impl SheetFormatError {
    /// Whether the content parsed but was refused by the rules.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
