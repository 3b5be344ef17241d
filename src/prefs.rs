//! Visitor preferences (language, theme) over a pluggable key/value store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};

use crate::controllers::theme::Theme;

/// Storage behind the preferences. Implementations: `MemoryStore` (tests and
/// embedders) and `FileStore` (a JSON object on disk).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// The two persisted flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    Language,
    Theme,
}

impl PrefKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::Language => "lang",
            PrefKey::Theme => "theme",
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file; every write goes straight to disk.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| e.to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.to_string()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&map).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}

/// Typed access with defaults. Store failures never reach callers: reads
/// degrade to the default and failed writes are logged.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
    default_language: String,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>, default_language: &str) -> Self {
        Preferences {
            store,
            default_language: default_language.to_string(),
        }
    }

    pub fn get(&self, key: PrefKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                debug!("Preference store unavailable for {}: {}", key.as_str(), e);
                None
            }
        }
    }

    pub fn set(&self, key: PrefKey, value: &str) {
        if let Err(e) = self.store.set(key.as_str(), value) {
            warn!("Failed to persist {}={}: {}", key.as_str(), value, e);
        }
    }

    pub fn language(&self) -> String {
        self.get(PrefKey::Language)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.default_language.clone())
    }

    /// Explicitly stored theme; `None` defers to the host signal.
    pub fn theme(&self) -> Option<Theme> {
        self.get(PrefKey::Theme).and_then(|v| Theme::parse(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, String> {
            Err("storage disabled".to_string())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("storage disabled".to_string())
        }
    }

    #[test]
    fn defaults_when_unset() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()), "tr");
        assert_eq!(prefs.language(), "tr");
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn writes_are_visible_immediately() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()), "tr");
        prefs.set(PrefKey::Language, "en");
        prefs.set(PrefKey::Theme, "dark");
        assert_eq!(prefs.language(), "en");
        assert_eq!(prefs.theme(), Some(Theme::Dark));
    }

    #[test]
    fn unavailable_store_degrades_to_defaults() {
        let prefs = Preferences::new(Arc::new(BrokenStore), "tr");
        prefs.set(PrefKey::Theme, "dark");
        assert_eq!(prefs.language(), "tr");
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn unknown_theme_value_is_ignored() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()), "tr");
        prefs.set(PrefKey::Theme, "sepia");
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        {
            let store = FileStore::new(&path);
            store.set("theme", "dark").unwrap();
            store.set("lang", "en").unwrap();
        }
        let store = FileStore::new(&path);
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(store.get("lang").unwrap(), Some("en".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn corrupt_file_reads_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let prefs = Preferences::new(Arc::new(FileStore::new(&path)), "tr");
        assert_eq!(prefs.language(), "tr");
    }
}
