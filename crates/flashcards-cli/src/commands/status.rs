//! Status command handler

use anyhow::Result;

use flashcards_core::{Config, FileStore, Repository};

use crate::output::{Output, OutputFormat};

/// Show where cards are stored and how many there are
pub fn show(repo: &Repository<FileStore>, config: &Config, output: &Output) -> Result<()> {
    let store = repo.store();
    let document_path = store.backend().path_for(store.key())?;
    let exists = store.exists()?;
    let document_size = store.raw()?.map(|r| r.len()).unwrap_or(0);
    let card_count = repo.count()?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage_key": store.key(),
                    "document_path": document_path,
                    "document_exists": exists,
                    "document_size": document_size,
                    "cards": card_count
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", card_count);
        }
        OutputFormat::Human => {
            println!("Flashcards Status");
            println!("=================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Key:      {}", store.key());
            println!("  Document: {}", document_path.display());
            if exists {
                println!("  Size:     {} bytes", document_size);
            } else {
                println!("  Size:     (not saved yet, showing starter cards)");
            }
            println!();
            println!("Contents:");
            println!("  Cards: {}", card_count);
        }
    }

    Ok(())
}
