//! Export and import command handlers

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use flashcards_core::{KeyValueStore, Repository, EXPORT_FILE_NAME};

use crate::output::Output;

/// Write the persisted document to a file, or stdout for `-`
pub async fn export<S: KeyValueStore>(
    repo: &Repository<S>,
    path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let document = repo.export_all().context("Failed to read cards for export")?;

    let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    if path == Path::new("-") {
        let mut stdout = std::io::stdout();
        stdout.write_all(document.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    tokio::fs::write(&path, document.as_bytes())
        .await
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!("Exported cards to {}", path.display()));
    Ok(())
}

/// Replace all cards with the contents of a JSON file
pub async fn import<S: KeyValueStore>(
    repo: &Repository<S>,
    path: PathBuf,
    output: &Output,
) -> Result<()> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    let report = repo.import_bytes(&bytes)?;

    output.success(&format!("Imported {} cards", report.imported));
    Ok(())
}
