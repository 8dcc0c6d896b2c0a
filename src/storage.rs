//! Best score persistence.
//!
//! ## Format
//!
//! localStorage key `bestScore` holds `{"version":1,"best_score":N}`.
//! Older builds stored the bare number as a string (`"123"`), which is still
//! accepted on load. Unreadable data is logged and discarded.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::arena::best_score::BestScoreStore;

/// Current record format version.
const RECORD_VERSION: u32 = 1;

/// localStorage key, shared with the original game.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "bestScore";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct BestScoreRecord {
    version: u32,
    best_score: u64,
}

/// Serialize a best score for storage.
fn encode(best: u64) -> Result<String, serde_json::Error> {
    serde_json::to_string(&BestScoreRecord {
        version: RECORD_VERSION,
        best_score: best,
    })
}

/// Parse a stored value: the JSON record, or a legacy bare number.
fn decode(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(record) = serde_json::from_str::<BestScoreRecord>(raw) {
        if record.version > RECORD_VERSION {
            crate::logging::warn(&format!(
                "best score: record version {} is newer than {}, reading anyway",
                record.version, RECORD_VERSION
            ));
        }
        return Some(record.best_score);
    }
    // Legacy: the number itself, possibly written as a float.
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        _ => None,
    }
}

// ── Browser storage ─────────────────────────────────────────────

/// The page's localStorage. Wasm only.
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Best score in the browser's localStorage.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u64> {
        let storage = get_storage()?;
        let raw = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            _ => return None,
        };
        let parsed = decode(&raw);
        if parsed.is_none() {
            crate::logging::warn(&format!("best score: unreadable value `{raw}`, discarding"));
            let _ = storage.remove_item(STORAGE_KEY);
        }
        parsed
    }

    fn store(&mut self, best: u64) -> bool {
        let json = match encode(best) {
            Ok(j) => j,
            Err(e) => {
                crate::logging::warn(&format!("best score: serialization failed: {e}"));
                return false;
            }
        };
        let Some(storage) = get_storage() else {
            crate::logging::warn("best score: localStorage unavailable, not saved");
            return false;
        };
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            crate::logging::warn(&format!("best score: localStorage write failed: {e:?}"));
            return false;
        }
        true
    }

    fn clear(&mut self) {
        if let Some(storage) = get_storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

// ── In-memory storage ───────────────────────────────────────────

/// Keeps the encoded record in memory. Used off-wasm and in tests; clones of
/// [`MemoryStore::handle`] observe the same slot.
pub struct MemoryStore {
    slot: Rc<Cell<Option<u64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(Cell::new(None)),
        }
    }

    pub fn with_value(best: u64) -> Self {
        let store = Self::new();
        store.slot.set(Some(best));
        store
    }

    /// Shared view of the stored value.
    pub fn handle(&self) -> Rc<Cell<Option<u64>>> {
        self.slot.clone()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.slot.get()
    }

    fn store(&mut self, best: u64) -> bool {
        // Round-trip through the wire format so both backends agree.
        match encode(best).ok().as_deref().and_then(decode) {
            Some(v) => {
                self.slot.set(Some(v));
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.slot.set(None);
    }
}

/// The store the app should use on this platform.
pub fn default_store() -> Box<dyn BestScoreStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorageStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_versioned_record() {
        let json = encode(321).unwrap();
        assert_eq!(json, r#"{"version":1,"best_score":321}"#);
    }

    #[test]
    fn decode_reads_record() {
        assert_eq!(decode(r#"{"version":1,"best_score":77}"#), Some(77));
    }

    #[test]
    fn decode_reads_legacy_bare_number() {
        assert_eq!(decode("123"), Some(123));
        assert_eq!(decode(" 45 "), Some(45));
        assert_eq!(decode("12.0"), Some(12));
    }

    #[test]
    fn decode_tolerates_unknown_fields_and_newer_version() {
        assert_eq!(
            decode(r#"{"version":9,"best_score":5,"future_field":true}"#),
            Some(5)
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("abc"), None);
        assert_eq!(decode("-4"), None);
        assert_eq!(decode(r#"{"best":1}"#), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), None);
        assert!(store.store(900));
        assert_eq!(store.load(), Some(900));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn handle_shares_slot() {
        let mut store = MemoryStore::new();
        let handle = store.handle();
        store.store(8);
        assert_eq!(handle.get(), Some(8));
    }
}
