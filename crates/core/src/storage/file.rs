use super::SessionStore;
use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Session store persisted as a flat JSON object on disk
///
/// The file is read once on open. Every write rewrites the whole document through a
/// temporary file and a rename, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating nothing until the first write
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// object of strings
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = items.len(), "Opened session file");

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut items = self
            .items
            .lock()
            .map_err(|_| CoreError::storage_error("session file lock poisoned"))?;
        // Only a write that reached the disk becomes visible to readers
        let mut next = items.clone();
        f(&mut next);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| CoreError::storage_error("session file lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.update(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> CoreResult<()> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ACCESS_TOKEN_KEY;
    use crate::tests::storage::SessionStoreTestSuite;

    #[test]
    fn file_store_passes_suite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session.json")).unwrap();
        SessionStoreTestSuite::new(store).run_all_tests().unwrap();
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set_item(ACCESS_TOKEN_KEY, "abc").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("abc")
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"accessToken\""));
    }

    #[test]
    fn failed_write_is_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = FileStore::open(blocker.join("session.json")).unwrap();

        // The parent directory can no longer be created
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(store.set_item(ACCESS_TOKEN_KEY, "t").is_err());
        assert_eq!(store.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn missing_and_empty_files_open_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(missing.get_item(ACCESS_TOKEN_KEY).unwrap(), None);

        let empty_path = dir.path().join("empty.json");
        std::fs::write(&empty_path, "").unwrap();
        let empty = FileStore::open(&empty_path).unwrap();
        assert_eq!(empty.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, CoreError::Serialization { .. }));
    }
}
