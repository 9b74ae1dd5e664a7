//! Card document persistence
//!
//! The `Store` maps one fixed key of a `KeyValueStore` to the serialized
//! card collection. The whole collection is read and written at once.
//!
//! ## Loading
//!
//! - key absent: the starter cards
//! - value is not JSON, or not a JSON array: an empty collection (logged)
//! - array: every entry shaped like a card, in order; other entries are
//!   dropped with a warning
//!
//! Absent and empty are distinct: saving `[]` loads back as no cards, while
//! clearing the key brings the starter cards back.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::CardResult;
use crate::models::{starter_cards, Card};
use crate::storage::{FileStore, KeyValueStore, StorageResult};

/// Persistence boundary for the card collection
pub struct Store<S> {
    backend: S,
    key: String,
}

impl Store<FileStore> {
    /// Open the file-backed store described by the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the file-backed store for a specific configuration
    pub fn open_with_config(config: &Config) -> Self {
        Self::new(FileStore::from_config(config), config.storage_key.clone())
    }
}

impl<S: KeyValueStore> Store<S> {
    /// Create a store persisting under `key` in `backend`
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key the collection lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the collection
    ///
    /// Only a failing backend is an error; corrupted content is recovered.
    pub fn load(&self) -> StorageResult<Vec<Card>> {
        match self.backend.get(&self.key)? {
            None => {
                debug!("No document under '{}', using starter cards", self.key);
                Ok(starter_cards())
            }
            Some(raw) => Ok(decode_document(&raw)),
        }
    }

    /// Serialize the collection and overwrite the persisted document
    pub fn save(&self, cards: &[Card]) -> CardResult<()> {
        let raw = serde_json::to_string(cards)?;
        self.backend.set(&self.key, &raw)?;
        debug!("Saved {} card(s) under '{}'", cards.len(), self.key);
        Ok(())
    }

    /// Remove the persisted document entirely
    pub fn clear(&self) -> StorageResult<()> {
        self.backend.delete(&self.key)
    }

    /// The persisted document exactly as stored
    pub fn raw(&self) -> StorageResult<Option<String>> {
        self.backend.get(&self.key)
    }

    /// Whether a document is currently persisted
    pub fn exists(&self) -> StorageResult<bool> {
        Ok(self.backend.get(&self.key)?.is_some())
    }
}

/// Decode a persisted document leniently
///
/// Never fails: unusable content yields an empty collection.
pub fn decode_document(raw: &str) -> Vec<Card> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Stored cards are not valid JSON, starting empty: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        warn!("Stored cards are not a JSON array, starting empty");
        return Vec::new();
    };

    let total = entries.len();
    let cards: Vec<Card> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Card>(entry) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!("Dropping malformed stored card at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if cards.len() != total {
        warn!("Loaded {} of {} stored card(s)", cards.len(), total);
    }
    cards
}
