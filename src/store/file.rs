use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use super::KeyValueStore;

/// Directory-backed store: one pretty-printed JSON file per key.
///
/// Writes go to a temporary file in the same directory and are renamed
/// into place, so a reader never sees a half-written record.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        if root.exists() && !root.is_dir() {
            return Err(StoreError::Backend(format!("{} exists but is not a directory", root.display())));
        }
        fs::create_dir_all(root)?;
        Ok(Self { root: root.to_path_buf() })
    }

    #[inline] pub fn root(&self) -> &Path { &self.root }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let safe = !key.is_empty()
            && !key.starts_with('.')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
        if !safe {
            return Err(StoreError::Backend(format!("key '{key}' cannot be used as a file name")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let target = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;

        // best-effort: make the rename durable
        let _ = File::open(&self.root).and_then(|dir| dir.sync_all());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn put_get_remove_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("records")).unwrap();

        assert_eq!(store.get("boundary_driveway").unwrap(), None);
        store.put("boundary_driveway", &json!({"toolType": "driveway"})).unwrap();
        assert!(dir.path().join("records/boundary_driveway.json").is_file());
        assert_eq!(store.get("boundary_driveway").unwrap(), Some(json!({"toolType": "driveway"})));

        // reopening sees the same data
        let reopened = FileStore::open(store.root()).unwrap();
        assert_eq!(reopened.get("boundary_driveway").unwrap(), Some(json!({"toolType": "driveway"})));

        store.remove("boundary_driveway").unwrap();
        store.remove("boundary_driveway").unwrap();
        assert_eq!(store.get("boundary_driveway").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.put("../escape", &json!(1)), Err(StoreError::Backend(_))));
        assert!(store.get("").is_err());
        assert!(store.get(".hidden").is_err());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        assert!(matches!(store.get("bad"), Err(StoreError::Json(_))));
    }

    #[test]
    fn root_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(FileStore::open(&file).is_err());
    }
}
