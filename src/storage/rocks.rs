use std::path::{Path, PathBuf};

use rocksdb::{DBCompressionType, IteratorMode, Options, DB};

use crate::contracts::{KvStore, StorageError};

/// RocksDB-backed implementation of the store under test.
///
/// The engine holds an exclusive lock on the root directory for the
/// lifetime of the handle; a second open at the same path fails until
/// this handle is dropped.
pub struct RocksStore {
    db: DB,
    path: PathBuf,
}

impl RocksStore {
    /// Opens or creates a store rooted at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // LZ4 keeps the store root small over long fuzz campaigns without
        // hurting open latency.
        opts.set_compression_type(DBCompressionType::Lz4);

        // A single run touches little data; a small memtable keeps memory
        // flat across thousands of short-lived processes.
        opts.set_write_buffer_size(8 * 1024 * 1024);

        let db = DB::open(&opts, path).map_err(|e| StorageError::RocksDb(e.to_string()))?;

        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// Root directory this handle was opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for RocksStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.db
            .put(key, value)
            .map_err(|e| StorageError::RocksDb(e.to_string()))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.db
            .get(key)
            .map_err(|e| StorageError::RocksDb(e.to_string()))
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.db
            .delete(key)
            .map_err(|e| StorageError::RocksDb(e.to_string()))
    }

    fn property(&self, name: &str) -> Result<Option<String>, StorageError> {
        self.db
            .property_value(name)
            .map_err(|e| StorageError::RocksDb(e.to_string()))
    }

    fn iterate(&self) -> Result<u64, StorageError> {
        let mut visited = 0u64;
        for entry in self.db.iterator(IteratorMode::Start) {
            let _ = entry.map_err(|e| StorageError::RocksDb(e.to_string()))?;
            visited += 1;
        }
        Ok(visited)
    }

    fn snapshot_read(&self) -> Result<(), StorageError> {
        let snapshot = self.db.snapshot();
        let _iter = snapshot.iterator(IteratorMode::Start);
        // The iterator is only constructed; the snapshot is released when
        // it drops at the end of this scope.
        Ok(())
    }

    fn compact_range(&self, begin: Option<&[u8]>, end: Option<&[u8]>) -> Result<(), StorageError> {
        self.db.compact_range(begin, end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (store, _dir) = create_test_store();

        store.put(b"foo", b"bar").unwrap();
        assert_eq!(store.get(b"foo").unwrap(), Some(b"bar".to_vec()));
    }

    #[test]
    fn get_missing_key_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get(b"absent").unwrap(), None);
    }

    #[test]
    fn delete_removes_key() {
        let (store, _dir) = create_test_store();

        store.put(b"foo", b"bar").unwrap();
        store.delete(b"foo").unwrap();
        assert_eq!(store.get(b"foo").unwrap(), None);
    }

    #[test]
    fn delete_of_absent_key_is_ok() {
        let (store, _dir) = create_test_store();
        assert!(store.delete(b"never-written").is_ok());
    }

    #[test]
    fn empty_key_and_value_are_valid() {
        let (store, _dir) = create_test_store();

        store.put(b"", b"").unwrap();
        assert_eq!(store.get(b"").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn binary_value_preserved() {
        let (store, _dir) = create_test_store();

        let value: Vec<u8> = (0..=255).collect();
        store.put(b"bin", &value).unwrap();
        assert_eq!(store.get(b"bin").unwrap(), Some(value));
    }

    #[test]
    fn known_property_has_a_value() {
        let (store, _dir) = create_test_store();

        let value = store.property("rocksdb.estimate-num-keys").unwrap();
        assert!(value.is_some());
    }

    #[test]
    fn unknown_property_returns_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.property("rocksdb.no-such-property").unwrap(), None);
    }

    #[test]
    fn iterate_visits_every_live_key() {
        let (store, _dir) = create_test_store();

        for i in 0..5 {
            store
                .put(format!("key-{}", i).as_bytes(), b"value")
                .unwrap();
        }
        store.delete(b"key-2").unwrap();

        assert_eq!(store.iterate().unwrap(), 4);
    }

    #[test]
    fn iterate_over_empty_store_is_zero() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.iterate().unwrap(), 0);
    }

    #[test]
    fn snapshot_read_completes() {
        let (store, _dir) = create_test_store();

        store.snapshot_read().unwrap();

        store.put(b"foo", b"bar").unwrap();
        store.snapshot_read().unwrap();

        // Snapshot was released; writes still go through afterwards.
        store.put(b"baz", b"qux").unwrap();
        assert_eq!(store.iterate().unwrap(), 2);
    }

    #[test]
    fn compact_range_accepts_open_and_closed_bounds() {
        let (store, _dir) = create_test_store();

        for i in 0..100 {
            store
                .put(format!("key-{:03}", i).as_bytes(), b"value")
                .unwrap();
        }

        store.compact_range(None, None).unwrap();
        store
            .compact_range(Some(b"key-010"), Some(b"key-050"))
            .unwrap();
        assert_eq!(store.get(b"key-030").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn second_open_at_same_path_fails_while_handle_is_live() {
        let (store, dir) = create_test_store();

        let second = RocksStore::open(dir.path());
        assert!(second.is_err());
        drop(store);

        // With the first handle gone the lock is free again.
        assert!(RocksStore::open(dir.path()).is_ok());
    }

    #[test]
    fn data_survives_drop_and_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.put(b"persisted", b"yes").unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(store.get(b"persisted").unwrap(), Some(b"yes".to_vec()));
    }
}
