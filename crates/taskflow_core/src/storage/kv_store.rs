use crate::error::AppError;
use std::collections::HashMap;
use std::path::PathBuf;

const DATA_DIR_ENV_VAR: &str = "TASKFLOW_DATA_DIR";

/// The external persistence capability: a string key-value store where any
/// call may fail. Callers above the gateway never see these failures.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn data_dir() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(DATA_DIR_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskflow"))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join("taskflow"))
    }
}

/// One file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Rooted at `TASKFLOW_DATA_DIR` when set, else the platform config dir.
    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::new(data_dir()?))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::io(format!("{}: {}", path.display(), err))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.root).map_err(|err| AppError::io(err.to_string()))?;
        std::fs::write(self.key_path(key), value).map_err(|err| AppError::io(err.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::io(format!("{}: {}", path.display(), err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStore, KeyValueStore, MemoryStore};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskflow-{nanos}-{name}"))
    }

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("key").unwrap(), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn memory_store_remove_is_idempotent() {
        let mut store = MemoryStore::new();
        store.remove("absent").unwrap();
    }

    #[test]
    fn file_store_round_trips_values() {
        let root = temp_dir("kv-round-trip");
        let mut store = FileStore::new(&root);

        assert_eq!(store.get("key").unwrap(), None);
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn file_store_remove_tolerates_missing_key() {
        let root = temp_dir("kv-remove-missing");
        let mut store = FileStore::new(&root);
        store.remove("absent").unwrap();
    }

    #[test]
    fn file_store_overwrites_existing_value() {
        let root = temp_dir("kv-overwrite");
        let mut store = FileStore::new(&root);

        store.set("key", "old").unwrap();
        store.set("key", "new").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("new"));

        std::fs::remove_dir_all(&root).ok();
    }
}
