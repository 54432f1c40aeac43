//! Recap use case.
//!
//! Loads the session's rule book and a sheet, then assembles everything the
//! recap/export collaborator shows: step status, allocation and derived stats.

mod error;

pub use error::RecapError;

use std::sync::Arc;

use serde::Serialize;
use sheetwright_domain::{first_incomplete_step, CharacterId, WizardStep};
use sheetwright_shared::{AllocationView, DerivedStatsView, StepValidation};

use crate::infrastructure::ports::{RuleBookSource, SheetSource};

// =============================================================================
// Result Types
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecapReport {
    pub character_id: CharacterId,
    pub name: String,
    pub species: String,
    pub steps: Vec<StepValidation>,
    /// First step still open; `None` once the build is complete
    pub next_step: Option<WizardStep>,
    pub allocation: AllocationView,
    pub derived: DerivedStatsView,
}

impl RecapReport {
    pub fn is_complete(&self) -> bool {
        self.next_step.is_none()
    }
}

// =============================================================================
// Use Case
// =============================================================================

pub struct Recap {
    rule_books: Arc<dyn RuleBookSource>,
    sheets: Arc<dyn SheetSource>,
}

impl Recap {
    pub fn new(rule_books: Arc<dyn RuleBookSource>, sheets: Arc<dyn SheetSource>) -> Self {
        Self { rule_books, sheets }
    }

    pub fn execute(&self) -> Result<RecapReport, RecapError> {
        let book = self.rule_books.load_rule_book()?;
        let sheet = self.sheets.load_sheet(&book)?;
        let species = book.species(sheet.species())?;

        let report = RecapReport {
            character_id: sheet.id(),
            name: sheet.name().to_string(),
            species: species.name.clone(),
            steps: StepValidation::all(&book, &sheet),
            next_step: first_incomplete_step(&book, &sheet),
            allocation: AllocationView::build(&book, &sheet)?,
            derived: DerivedStatsView::build(&book, &sheet)?,
        };
        tracing::info!(
            character = %report.character_id,
            complete = report.is_complete(),
            next_step = ?report.next_step,
            "Recap ready"
        );
        Ok(report)
    }
}
