use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// The storage seam for persisted view state: one string value per namespace
/// key. The original target is origin-scoped browser storage; here the
/// shipped backends are an in-memory map and a JSON-file-per-namespace
/// directory.
pub trait KeyValueStore {
    /// Read a value. Missing keys and unreadable entries both come back as
    /// `None`; this never fails outward.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Callers treat failures as best-effort (logged, never
    /// surfaced), but the error is still returned for those that care.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Ephemeral store for tests and sessions that opt out of disk persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one `<namespace>.json` per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The platform-default location: `<data dir>/table-state/view-state`.
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine data directory"))?
            .join("table-state")
            .join("view-state");
        Self::new(data_dir)
    }

    /// Open the store named by the persistence config: its `data_dir`
    /// override when set, the platform default otherwise.
    pub fn from_config(config: &crate::config::PersistenceConfig) -> Result<Self> {
        match &config.data_dir {
            Some(dir) => Self::new(dir.clone()),
            None => Self::default_location(),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Namespaces are opaque caller strings; keep the filename safe.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("buylist"), None);
        store.set("buylist", "{}").unwrap();
        assert_eq!(store.get("buylist").as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert_eq!(store.get("watchlist"), None);
        store.set("watchlist", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("watchlist").as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn from_config_honors_the_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::PersistenceConfig {
            enabled: true,
            data_dir: Some(dir.path().join("views")),
        };
        let store = FileStore::from_config(&config).unwrap();
        store.set("buylist", "{}").unwrap();
        assert!(dir.path().join("views").join("buylist.json").exists());
    }

    #[test]
    fn file_store_sanitizes_namespace_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.set("pages/buylist#3", "x").unwrap();
        assert_eq!(store.get("pages/buylist#3").as_deref(), Some("x"));
        // Nothing escaped the store directory.
        assert!(dir.path().join("pages_buylist_3.json").exists());
    }
}
