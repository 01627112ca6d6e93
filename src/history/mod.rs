//! Calculation history and its persistence.
//!
//! History is append-only for a session: it is loaded once, and every new
//! entry is written through to the backing store immediately.

mod entry;
mod store;

pub use entry::HistoryEntry;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

/// Key the serialized history is stored under.
pub const HISTORY_KEY: &str = "calculatorHistory";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid store key '{0}'")]
    InvalidKey(String),

    #[error("No data directory available on this platform")]
    NoDataDir,

    /// Failure reported by a host-provided store or repository.
    #[error("Store error: {message}")]
    Store { message: String },
}

/// Loads and saves the full history list.
pub trait HistoryRepository {
    /// Read the stored list. An absent list is `Ok(vec![])`.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Replace the stored list with `entries`.
    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;
}

/// Repository that keeps history as a JSON array inside a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct StoreRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore> HistoryRepository for StoreRepository<S> {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.store.get(&self.key)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let text = serde_json::to_string(entries)?;
        self.store.set(&self.key, &text)
    }
}

/// The session's history list, synchronized with a repository.
#[derive(Debug)]
pub struct History<R> {
    entries: Vec<HistoryEntry>,
    repository: R,
}

impl<R: HistoryRepository> History<R> {
    /// Load history from `repository`.
    ///
    /// A missing or unreadable list starts the session with empty history.
    pub fn load(repository: R) -> Self {
        let entries = match repository.load() {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "Loaded calculator history");
                entries
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable calculator history: {}", e);
                Vec::new()
            }
        };

        Self {
            entries,
            repository,
        }
    }

    /// Append an entry and write the whole list through to the repository.
    ///
    /// The entry stays in memory even when saving fails.
    pub fn push(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.entries.push(entry);
        self.repository.save(&self.entries)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Repository whose saves always fail.
    struct BrokenRepository;

    impl HistoryRepository for BrokenRepository {
        fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Err(HistoryError::Store {
                message: "offline".to_string(),
            })
        }

        fn save(&mut self, _entries: &[HistoryEntry]) -> Result<(), HistoryError> {
            Err(HistoryError::Store {
                message: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let entries = vec![
            HistoryEntry::new("2+2", "4"),
            HistoryEntry::new("1000*3", "3,000"),
            HistoryEntry::new("50%", "0.5"),
        ];
        let mut repo = StoreRepository::new(MemoryStore::new());
        repo.save(&entries).unwrap();
        assert_eq!(repo.load().unwrap(), entries);
    }

    #[test]
    fn test_missing_history_is_empty() {
        let history = History::load(StoreRepository::new(MemoryStore::new()));
        assert!(history.is_empty());
    }

    #[test]
    fn test_malformed_history_is_empty() {
        let store = MemoryStore::with_value(HISTORY_KEY, "{not json");
        let repo = StoreRepository::new(store);
        assert!(matches!(repo.load(), Err(HistoryError::Serialization(_))));

        let history = History::load(repo);
        assert!(history.is_empty());
    }

    #[test]
    fn test_loads_existing_entries() {
        let store = MemoryStore::with_value(
            HISTORY_KEY,
            r#"[{"expression":"2^3","result":"8"}]"#,
        );
        let history = History::load(StoreRepository::new(store));
        assert_eq!(history.entries(), &[HistoryEntry::new("2^3", "8")]);
    }

    #[test]
    fn test_push_writes_through() {
        let mut history = History::load(StoreRepository::new(MemoryStore::new()));
        history.push(HistoryEntry::new("2+2", "4")).unwrap();
        history.push(HistoryEntry::new("3*3", "9")).unwrap();

        let stored = history.repository().store().get(HISTORY_KEY).unwrap().unwrap();
        assert_eq!(
            stored,
            r#"[{"expression":"2+2","result":"4"},{"expression":"3*3","result":"9"}]"#
        );
    }

    #[test]
    fn test_failed_save_keeps_entry_in_memory() {
        let mut history = History::load(BrokenRepository);
        let err = history.push(HistoryEntry::new("1+1", "2")).unwrap_err();
        assert!(matches!(err, HistoryError::Store { .. }));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut repo = StoreRepository::with_key(MemoryStore::new(), "work");
        repo.save(&[HistoryEntry::new("1", "1")]).unwrap();
        assert!(repo.store().get(HISTORY_KEY).unwrap().is_none());
        assert!(repo.store().get("work").unwrap().is_some());
    }
}
