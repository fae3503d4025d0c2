//! One-shot operation dispatch against the store under test.

mod script;

pub use script::{FuzzOp, Script};

use crate::config::HarnessConfig;
use crate::contracts::{KvStore, StorageError};
use crate::storage::RocksStore;

/// Owns the store handle for the duration of one run.
///
/// Every store call returns a status; the harness discards it at the
/// call site. Feeding the engine untrusted arguments and watching for
/// crashes is the point, not checking statuses. The one exception is
/// reopen, whose failure ends the run.
pub struct Harness {
    store: Option<RocksStore>,
}

impl Harness {
    /// Opens the store with create-if-missing at the configured root.
    ///
    /// An open failure is a valid, uninteresting fuzz outcome; the
    /// caller logs it and exits successfully.
    pub fn open(config: &HarnessConfig) -> Result<Self, StorageError> {
        let store = RocksStore::open(&config.db_path)?;
        Ok(Self { store: Some(store) })
    }

    /// Applies one scripted operation.
    ///
    /// Returns the bytes to emit on stdout (Get only, empty when the key
    /// is missing or the read failed). `Err` means the run ended early:
    /// reopen failed, or the handle is already gone.
    pub fn run(&mut self, script: &Script) -> Result<Option<Vec<u8>>, StorageError> {
        let Some(store) = self.store.as_ref() else {
            return Err(StorageError::Closed);
        };

        let key = script.key.as_bytes();

        match script.op {
            Some(FuzzOp::Put) => {
                let _ = store.put(key, script.value.as_bytes());
            }
            Some(FuzzOp::Get) => {
                let value = store.get(key).ok().flatten().unwrap_or_default();
                return Ok(Some(value));
            }
            Some(FuzzOp::Delete) => {
                let _ = store.delete(key);
            }
            Some(FuzzOp::GetProperty) => {
                let _ = store.property(&script.property);
            }
            Some(FuzzOp::Iterate) => {
                let _ = store.iterate();
            }
            Some(FuzzOp::GetReleaseSnapshot) => {
                let _ = store.snapshot_read();
            }
            Some(FuzzOp::ReopenDb) => {
                let path = store.path().to_path_buf();
                // The live handle must drop before the reopen; the engine
                // keeps an exclusive lock on the root while it exists.
                self.store = None;
                self.store = Some(RocksStore::open(&path)?);
            }
            Some(FuzzOp::CompactRange) => {
                let _ = store.compact_range(
                    compact_bound(&script.range_begin),
                    compact_bound(&script.range_end),
                );
            }
            // Out-of-range selector: no store call, successful run.
            None => {}
        }

        Ok(None)
    }
}

/// Compaction bound from a script field; an empty field is open-ended.
fn compact_bound(field: &str) -> Option<&[u8]> {
    (!field.is_empty()).then(|| field.as_bytes())
}
