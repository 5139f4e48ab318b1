//! Best score persistence
//!
//! The game only needs a tiny key-value store holding integers. Storage is
//! never allowed to break a run:
//! - a failed or corrupt read counts as "no best yet" (0)
//! - a failed write is logged and dropped

use std::collections::HashMap;

use crate::consts::BEST_SCORE_KEY;

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("stored value for '{key}' is not an integer: '{value}'")]
    Corrupt { key: String, value: String },

    #[error("could not write '{key}'")]
    WriteFailed { key: String },
}

/// Integer key-value store
pub trait ScoreStore {
    /// Read a value (`Ok(None)` when absent)
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Write a value
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

/// Parse a stored decimal string
fn parse_score(key: &str, raw: &str) -> Result<u32, StoreError> {
    raw.trim().parse::<u32>().map_err(|_| StoreError::Corrupt {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Read the best score, treating every failure as 0
pub fn load_best<S: ScoreStore + ?Sized>(store: &S) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        Ok(Some(best)) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Best score unreadable ({}), using 0", e);
            0
        }
    }
}

/// Persist a new best score. Write failures are logged and ignored.
pub fn commit_best<S: ScoreStore + ?Sized>(store: &mut S, best: u32) {
    match store.set(BEST_SCORE_KEY, best) {
        Ok(()) => log::info!("Best score saved ({})", best),
        Err(e) => log::warn!("Best score not saved: {}", e),
    }
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }

    /// A store that refuses every read and write, like denied browser storage
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }

    /// Put a raw string under a key, bypassing integer encoding
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.values.insert(key.to_string(), raw.to_string());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        self.values
            .get(key)
            .map(|raw| parse_score(key, raw))
            .transpose()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    #[cfg(target_arch = "wasm32")]
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, best score will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        let raw = storage
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)?;
        raw.map(|raw| parse_score(key, &raw)).transpose()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let failed = || StoreError::WriteFailed {
            key: key.to_string(),
        };
        let storage = self.storage.as_ref().ok_or_else(failed)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|_| failed())
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
impl LocalStore {
    pub fn open() -> Self {
        Self {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for LocalStore {
    fn get(&self, _key: &str) -> Result<Option<u32>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, key: &str, _value: u32) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_reads_as_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get(BEST_SCORE_KEY), Ok(None));
        assert_eq!(load_best(&store), 0);
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        commit_best(&mut store, 12);
        assert_eq!(load_best(&store), 12);
    }

    #[test]
    fn test_reads_legacy_string_values() {
        let mut store = MemoryStore::new();
        store.insert_raw(BEST_SCORE_KEY, " 7 ");
        assert_eq!(load_best(&store), 7);
    }

    #[test]
    fn test_corrupt_value_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.insert_raw(BEST_SCORE_KEY, "lots");
        assert!(matches!(
            store.get(BEST_SCORE_KEY),
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(load_best(&store), 0);
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.get(BEST_SCORE_KEY), Err(StoreError::Unavailable));
        assert_eq!(load_best(&store), 0);
        // Must not panic
        commit_best(&mut store, 99);
        assert_eq!(load_best(&store), 0);
    }

    #[test]
    fn test_native_local_store_is_unavailable() {
        let mut store = LocalStore::open();
        assert_eq!(load_best(&store), 0);
        commit_best(&mut store, 3);
    }
}
