//! Best-deal history side-channel
//!
//! The engine reports a period-over-period percent change on its headline
//! figure, which requires remembering one scalar between invocations. The
//! store is an injected dependency so the aggregation step stays
//! deterministic under test. It is a last-write-wins cache with no
//! atomicity guarantee across concurrent callers, not a persistence
//! engine.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read/write access to the previously recorded best-deal value.
pub trait BestDealStore {
    /// Last recorded best deal, in millions. `None` when no prior value
    /// exists or the record is unreadable.
    fn load(&self) -> Option<f64>;

    /// Record a new best deal. Failures are swallowed; the side-channel
    /// must never fail a computation.
    fn store(&self, value: f64);
}

/// Store that remembers nothing; percent change always reports zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl BestDealStore for NoHistory {
    fn load(&self) -> Option<f64> {
        None
    }

    fn store(&self, _value: f64) {}
}

/// In-memory store for tests and single-process callers.
#[derive(Debug, Default)]
pub struct InMemoryBestDealStore {
    value: Mutex<Option<f64>>,
}

impl InMemoryBestDealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: f64) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl BestDealStore for InMemoryBestDealStore {
    fn load(&self) -> Option<f64> {
        let guard = match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.filter(|v| v.is_finite())
    }

    fn store(&self, value: f64) {
        let mut guard = match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(value);
    }
}

/// On-disk record for the file-backed store.
#[derive(Debug, Serialize, Deserialize)]
struct BestDealRecord {
    best_deal: f64,
    updated_at: DateTime<Utc>,
}

/// JSON-file-backed store for CLI runs that span processes.
#[derive(Debug, Clone)]
pub struct FileBestDealStore {
    path: PathBuf,
}

impl FileBestDealStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl BestDealStore for FileBestDealStore {
    fn load(&self) -> Option<f64> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        let record: BestDealRecord = serde_json::from_str(&text).ok()?;
        record.best_deal.is_finite().then_some(record.best_deal)
    }

    fn store(&self, value: f64) {
        let record = BestDealRecord {
            best_deal: value,
            updated_at: Utc::now(),
        };
        let text = match serde_json::to_string_pretty(&record) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("failed to serialize best-deal record: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, text) {
            log::warn!("failed to write best-deal record to {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let store = InMemoryBestDealStore::new();
        assert_eq!(store.load(), None);

        store.store(4.2);
        assert_eq!(store.load(), Some(4.2));

        // Last write wins
        store.store(3.9);
        assert_eq!(store.load(), Some(3.9));
    }

    #[test]
    fn test_in_memory_filters_non_finite() {
        let store = InMemoryBestDealStore::with_value(f64::NAN);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_no_history_is_inert() {
        let store = NoHistory;
        store.store(4.2);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join("offer_engine_best_deal_test.json");
        let _ = std::fs::remove_file(&path);

        let store = FileBestDealStore::new(&path);
        assert_eq!(store.load(), None);

        store.store(5.25);
        assert_eq!(store.load(), Some(5.25));

        let _ = std::fs::remove_file(&path);
    }
}
