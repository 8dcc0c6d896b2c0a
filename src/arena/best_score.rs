//! The single persisted scalar: best score across runs.

/// Where the best score lives between sessions.
///
/// Implementations swallow their own I/O failures (log and carry on): a
/// missing or broken store behaves like an empty one.
pub trait BestScoreStore {
    /// Stored value, or `None` when nothing (readable) is stored.
    fn load(&self) -> Option<u64>;
    /// Persist `best`. Returns false if the write failed.
    fn store(&mut self, best: u64) -> bool;
    /// Forget the stored value.
    fn clear(&mut self);
}

/// Process-wide best score backed by a store.
pub struct BestScore {
    value: u64,
    /// False after a write the store refused; the value lives in memory only.
    saved: bool,
    store: Box<dyn BestScoreStore>,
}

impl BestScore {
    /// Read the stored value once at startup.
    pub fn load(store: Box<dyn BestScoreStore>) -> Self {
        let value = store.load().unwrap_or(0);
        Self {
            value,
            saved: true,
            store,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the current value reached the store.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Raise the best score to `score` if it is higher, writing it back.
    /// Returns true when the best score changed.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.saved = self.store.store(score);
        true
    }

    pub fn clear(&mut self) {
        self.value = 0;
        self.saved = true;
        self.store.clear();
    }
}
