//! Error types for port operations.

use sheetwright_shared::SheetFormatError;

/// Loading reference data or a sheet failed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File could not be read - includes the path for actionable messages.
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Content read but not accepted.
    #[error("Invalid content in {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: SheetFormatError,
    },

    /// Nothing configured to load from.
    #[error("No {0} configured")]
    NotConfigured(&'static str),
}

impl SourceError {
    pub fn io(path: impl ToString, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    pub fn format(path: impl ToString, source: SheetFormatError) -> Self {
        Self::Format {
            path: path.to_string(),
            source,
        }
    }
}
