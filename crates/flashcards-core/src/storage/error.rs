//! Storage errors
//!
//! Failures of the key-value backends, tagged with the file and operation
//! involved so the message can point the user at the right place.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Linux/macOS `ENOSPC`
const ENOSPC: i32 = 28;

/// File operation a backend was performing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Write,
    Delete,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::Delete => "delete",
        })
    }
}

/// Errors raised by `KeyValueStore` backends
#[derive(Error, Debug)]
pub enum StorageError {
    /// The card directory could not be created
    #[error("Cannot create card directory '{dir}': {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No permission to {op} '{path}'")]
    PermissionDenied {
        op: FileOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Out of disk space or over quota while saving
    #[error("Not enough space to save '{path}': {source}")]
    OutOfSpace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not {op} '{path}': {source}")]
    Io {
        op: FileOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The finished temp file could not replace the document
    #[error("Could not move '{from}' into place at '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key cannot be used as a file name
    #[error("Invalid storage key '{0}': keys must be non-empty and contain no path separators")]
    InvalidKey(String),

    /// A thread panicked while holding the in-memory map
    #[error("In-memory store is unusable after a panic")]
    Poisoned,
}

impl StorageError {
    /// Classify an I/O failure of `op` on `path`
    pub fn io(op: FileOp, error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied {
                op,
                path,
                source: error,
            }
        } else if op == FileOp::Write && is_out_of_space(&error) {
            StorageError::OutOfSpace {
                path,
                source: error,
            }
        } else {
            StorageError::Io {
                op,
                path,
                source: error,
            }
        }
    }

    /// Whether the user can fix this without touching the cards
    ///
    /// True exactly when there is a suggestion to show.
    pub fn is_recoverable(&self) -> bool {
        self.recovery_suggestion().is_some()
    }

    /// What the user can do about it
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::OutOfSpace { .. } => Some("Free up disk space, then save again."),
            StorageError::PermissionDenied { .. } => {
                Some("Make sure you own the data directory (see `flashcards status`).")
            }
            StorageError::CreateDir { .. } => {
                Some("Point data_dir at a writable location with `flashcards config set`.")
            }
            StorageError::InvalidKey(_) => {
                Some("Use a plain name such as 'flashcards_v1' for storage_key.")
            }
            _ => None,
        }
    }
}

fn is_out_of_space(error: &io::Error) -> bool {
    if error.raw_os_error() == Some(ENOSPC) {
        return true;
    }
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left") || msg.contains("quota exceeded")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
