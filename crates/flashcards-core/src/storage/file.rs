//! File-backed key-value storage
//!
//! Each key maps to `<dir>/<key>.json`. Writes are atomic (write to a temp
//! file, sync, then rename) so a crash never leaves a half-written document.
//!
//! Storage location: `~/.local/share/flashcards/` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{FileOp, KeyValueStore, StorageError, StorageResult};
use crate::config::Config;

/// Key-value store persisting one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store rooted at the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// The directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(FileOp::Read, e, path)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(FileOp::Delete, e, path)),
        }
    }
}

/// Keys become file stems, so they may not escape the store directory
fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.trim().is_empty()
        || key == "."
        || key == ".."
        || key.contains(|c| matches!(c, '/' | '\\' | '\0'));
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDir {
            dir: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let write_failed = |e: io::Error| StorageError::io(FileOp::Write, e, temp_path.clone());
    let mut file = File::create(&temp_path).map_err(write_failed)?;
    file.write_all(data).map_err(write_failed)?;
    file.sync_all().map_err(write_failed)?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::Rename {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.get("cards").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("cards", r#"[{"id":1,"q":"a","a":"b"}]"#).unwrap();

        assert!(temp_dir.path().join("cards.json").exists());
        assert_eq!(
            store.get("cards").unwrap().as_deref(),
            Some(r#"[{"id":1,"q":"a","a":"b"}]"#)
        );
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("cards", "[1]").unwrap();
        store.set("cards", "[2]").unwrap();

        assert_eq!(store.get("cards").unwrap().as_deref(), Some("[2]"));
        assert!(!temp_dir.path().join("cards.json.tmp").exists());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("cards", "[]").unwrap();
        store.delete("cards").unwrap();
        assert!(store.get("cards").unwrap().is_none());

        // Deleting again is fine
        store.delete("cards").unwrap();
    }

    #[test]
    fn test_creates_parent_dirs_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStore::new(&nested);

        store.set("cards", "[]").unwrap();
        assert!(nested.join("cards.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        for key in ["", "..", "../cards", "a/b", "a\\b"] {
            assert!(
                matches!(store.set(key, "[]"), Err(StorageError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_values_are_stored_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        let raw = "[ {\"id\": 1,\n \"q\": \"spaced\" } ]";
        store.set("cards", raw).unwrap();

        let on_disk = fs::read_to_string(temp_dir.path().join("cards.json")).unwrap();
        assert_eq!(on_disk, raw);
    }
}
