//! Export and import of the whole collection
//!
//! Export hands out the persisted document byte for byte. Import validates
//! the incoming document completely before replacing the collection, so a
//! rejected file never changes anything.

use std::collections::HashSet;

use serde_json::Value;
use tracing::info;

use crate::error::{CardError, CardResult};
use crate::models::Card;
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// Suggested file name for exported collections
pub const EXPORT_FILE_NAME: &str = "flashcards-export.json";

/// Content type of exported collections
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Document exported when nothing has been persisted
const EMPTY_DOCUMENT: &str = "[]";

/// Outcome of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of cards now in the collection
    pub imported: usize,
}

impl<S: KeyValueStore> Repository<S> {
    /// The persisted document exactly as stored, or `[]` when absent
    pub fn export_all(&self) -> CardResult<String> {
        let _guard = self.lock();
        let raw = self.store().raw()?;
        Ok(raw.unwrap_or_else(|| EMPTY_DOCUMENT.to_string()))
    }

    /// Replace the collection with the cards in `document`
    pub fn import_all(&self, document: &str) -> CardResult<ImportReport> {
        let cards = parse_import(document)?;

        let _guard = self.lock();
        self.store().save(&cards)?;
        info!("Imported {} card(s)", cards.len());

        Ok(ImportReport {
            imported: cards.len(),
        })
    }

    /// Replace the collection from raw bytes, which must be UTF-8 JSON
    pub fn import_bytes(&self, bytes: &[u8]) -> CardResult<ImportReport> {
        let document = std::str::from_utf8(bytes)
            .map_err(|e| CardError::MalformedImport(format!("not UTF-8 text: {}", e)))?;
        self.import_all(document)
    }
}

/// Validate an import document strictly
///
/// The document must be a JSON array whose entries are all cards with
/// distinct ids.
pub fn parse_import(document: &str) -> CardResult<Vec<Card>> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| CardError::MalformedImport(format!("not valid JSON: {}", e)))?;

    let Value::Array(entries) = value else {
        return Err(CardError::MalformedImport(
            "expected a JSON array of cards".to_string(),
        ));
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut cards = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let card: Card = serde_json::from_value(entry)
            .map_err(|e| CardError::MalformedImport(format!("entry {}: {}", index, e)))?;
        if !seen.insert(card.id) {
            return Err(CardError::MalformedImport(format!(
                "entry {}: duplicate id {}",
                index, card.id
            )));
        }
        cards.push(card);
    }

    Ok(cards)
}
