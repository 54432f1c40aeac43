//! Runner configuration from the environment.

use std::path::PathBuf;

pub const RULE_BOOK_VAR: &str = "SHEETWRIGHT_RULEBOOK";
pub const SHEET_VAR: &str = "SHEETWRIGHT_SHEET";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Rule book JSON; the standard book is used when unset
    pub rule_book_path: Option<PathBuf>,
    /// Exported sheet to recap
    pub sheet_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self {
            rule_book_path: path(RULE_BOOK_VAR),
            sheet_path: path(SHEET_VAR),
        }
    }

    /// A sheet path given on the command line wins over the environment.
    pub fn with_sheet_arg(self, arg: Option<String>) -> Self {
        match arg {
            Some(path) => Self {
                sheet_path: Some(PathBuf::from(path)),
                ..self
            },
            None => self,
        }
    }
}
