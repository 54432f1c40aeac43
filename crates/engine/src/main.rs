//! Sheetwright Engine - Main entry point.
//!
//! Loads a rule book and an exported sheet, then prints the sheet's recap as
//! JSON. The sheet path comes from the first argument or `SHEETWRIGHT_SHEET`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod infrastructure;
mod use_cases;

use infrastructure::config::EngineConfig;
use infrastructure::files::{FileRuleBookSource, FileSheetSource};
use use_cases::Recap;

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetwright_engine=debug,sheetwright_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env().with_sheet_arg(std::env::args().nth(1));
    tracing::info!(
        rule_book = ?config.rule_book_path,
        sheet = ?config.sheet_path,
        "Starting Sheetwright Engine"
    );

    let recap = Recap::new(
        Arc::new(FileRuleBookSource::new(config.rule_book_path)),
        Arc::new(FileSheetSource::new(config.sheet_path)),
    );
    let report = recap.execute()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(step) = report.next_step {
        tracing::warn!(step = step.display_name(), "Sheet is not complete");
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Logging is not up yet, so report bad files on stderr.
    for (path, e) in load_env_files(&repo_root) {
        eprintln!("Ignoring {}: {}", path.display(), e);
    }
}

/// Load `.env.local` then `.env` from `dir`, returning files that failed to parse.
fn load_env_files(dir: &Path) -> Vec<(PathBuf, dotenvy::Error)> {
    // Prefer local overrides.
    [".env.local", ".env"]
        .into_iter()
        .map(|filename| dir.join(filename))
        .filter(|path| path.exists())
        .filter_map(|path| dotenvy::from_path(&path).err().map(|e| (path, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_env_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".env"), "SHEETWRIGHT_BROKEN=\"unterminated\n").unwrap();

        let failures = load_env_files(dir.path());
        assert_eq!(failures.len(), 1);
        assert!(failures[0].0.ends_with(".env"));
    }

    #[test]
    fn missing_env_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_env_files(dir.path()).is_empty());
    }
}
