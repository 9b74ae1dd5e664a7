//! Card operation errors
//!
//! Outcomes the user-facing layers surface: validation failures, lookup
//! misses, rejected imports, and storage failures.

use thiserror::Error;

use crate::models::CardId;
use crate::storage::StorageError;

/// Errors returned by repository and transfer operations
#[derive(Error, Debug)]
pub enum CardError {
    /// Question text was empty after trimming trailing whitespace
    #[error("Please type a question")]
    EmptyQuestion,

    /// No card with the given id exists
    #[error("Card not found: {0}")]
    NotFound(CardId),

    /// Import payload was not a JSON array of cards
    #[error("Import failed: invalid file ({0})")]
    MalformedImport(String),

    /// Serializing the collection failed
    #[error("Failed to serialize cards: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Underlying key-value storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CardError {
    /// Whether the error was caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CardError::EmptyQuestion | CardError::NotFound(_) | CardError::MalformedImport(_)
        )
    }
}

/// Result type for card operations
pub type CardResult<T> = Result<T, CardError>;
