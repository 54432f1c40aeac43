//! File-backed sources.

use std::path::PathBuf;

use sheetwright_domain::{CharacterSheet, RuleBook};
use sheetwright_shared::{import_sheet, parse_rule_book};

use super::ports::{RuleBookSource, SheetSource, SourceError};

/// Rule book from a JSON file, or the built-in standard book when no path
/// is configured.
#[derive(Debug, Clone)]
pub struct FileRuleBookSource {
    path: Option<PathBuf>,
}

impl FileRuleBookSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl RuleBookSource for FileRuleBookSource {
    fn load_rule_book(&self) -> Result<RuleBook, SourceError> {
        let Some(path) = &self.path else {
            tracing::info!("No rule book file configured, using the standard rule book");
            return Ok(RuleBook::standard());
        };
        let shown = path.display();
        tracing::info!(path = %shown, "Loading rule book");
        let json = std::fs::read_to_string(path).map_err(|e| SourceError::io(&shown, e))?;
        parse_rule_book(&json).map_err(|e| SourceError::format(&shown, e))
    }
}

/// Sheet from an exported JSON file.
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    path: Option<PathBuf>,
}

impl FileSheetSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl SheetSource for FileSheetSource {
    fn load_sheet(&self, book: &RuleBook) -> Result<CharacterSheet, SourceError> {
        let path = self
            .path
            .as_ref()
            .ok_or(SourceError::NotConfigured("sheet file"))?;
        let shown = path.display();
        tracing::info!(path = %shown, "Loading sheet");
        let json = std::fs::read_to_string(path).map_err(|e| SourceError::io(&shown, e))?;
        import_sheet(book, &json).map_err(|e| SourceError::format(&shown, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetwright_domain::SkillKind;
    use sheetwright_shared::export_sheet;

    #[test]
    fn missing_path_falls_back_to_standard_book() {
        let book = FileRuleBookSource::new(None).load_rule_book().unwrap();
        assert_eq!(book, RuleBook::standard());
    }

    #[test]
    fn rule_book_file_is_parsed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("book.json");
        let mut book = RuleBook::standard();
        book.rules.hobby_pool = 12;
        std::fs::write(&path, serde_json::to_string(&book).unwrap()).unwrap();

        let loaded = FileRuleBookSource::new(Some(path)).load_rule_book().unwrap();
        assert_eq!(loaded.rules.hobby_pool, 12);
    }

    #[test]
    fn unreadable_file_names_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let err = FileRuleBookSource::new(Some(path)).load_rule_book().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn sheet_file_round_trips() {
        let book = RuleBook::standard();
        let sheet = CharacterSheet::new("Grok", book.species("troll").unwrap());
        let sheet = book.ledger(SkillKind::Hobby).add_rank(&sheet, "Chess").unwrap();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("grok.json");
        std::fs::write(&path, export_sheet(&sheet).unwrap()).unwrap();

        let loaded = FileSheetSource::new(Some(path)).load_sheet(&book).unwrap();
        assert_eq!(loaded, sheet);
    }

    #[test]
    fn corrupt_sheet_is_a_format_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{}").unwrap();
        let err = FileSheetSource::new(Some(path))
            .load_sheet(&RuleBook::standard())
            .unwrap_err();
        assert!(matches!(err, SourceError::Format { .. }));
    }

    #[test]
    fn unset_sheet_path_is_not_configured() {
        assert!(matches!(
            FileSheetSource::new(None).load_sheet(&RuleBook::standard()),
            Err(SourceError::NotConfigured(_))
        ));
    }
}
