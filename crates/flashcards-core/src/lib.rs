//! Flashcards Core Library
//!
//! Question/answer cards persisted as one JSON document under a single
//! key of a key-value store.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let repo = Repository::open_with_config(&config);
//!
//! let card = repo.add("HTML stands for?", "HyperText Markup Language")?;
//! repo.update(card.id, "HTML stands for...?", "HyperText Markup Language")?;
//!
//! let exported = repo.export_all()?;
//! ```
//!
//! # Modules
//!
//! - `storage`: key-value capability with file and in-memory backends
//! - `store`: the card document under one key, with load fallbacks
//! - `repository`: add, update, remove, clear over the whole collection
//! - `transfer`: verbatim export and validated whole-collection import
//! - `view`: render-ready projection with flip state
//! - `config`: application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod view;

pub use config::Config;
pub use error::{CardError, CardResult};
pub use models::{Card, CardId};
pub use repository::Repository;
pub use storage::{FileOp, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::Store;
pub use transfer::{ImportReport, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use view::{project, CardView, DeckView, Face, FlipState};
