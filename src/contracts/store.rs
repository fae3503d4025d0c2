use crate::contracts::error::StorageError;

/// Operation surface of the store under test.
///
/// Mirrors the public API of a LevelDB-lineage engine: point writes and
/// reads, deletes, engine property queries, full iteration, snapshot
/// reads and range compaction. Reopen is not part of the contract; it is
/// a lifecycle concern of whoever owns the handle, and the engine's
/// exclusive lock means the old handle must be gone first.
pub trait KvStore: Send + Sync {
    /// Writes a key/value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), StorageError>;

    /// Queries an engine-defined property (e.g. `rocksdb.stats`).
    /// Returns `None` for a name the engine does not recognize.
    fn property(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Scans the whole keyspace front to back, discarding entries.
    /// Returns the number of entries visited.
    fn iterate(&self) -> Result<u64, StorageError>;

    /// Acquires a snapshot, builds a snapshot-scoped iterator and
    /// releases the snapshot without driving the iterator.
    fn snapshot_read(&self) -> Result<(), StorageError>;

    /// Compacts the given key range. A `None` bound is open-ended.
    fn compact_range(&self, begin: Option<&[u8]>, end: Option<&[u8]>) -> Result<(), StorageError>;
}
