#![no_main]

use arbitrary::Arbitrary;
use kvprobe::contracts::KvStore;
use kvprobe::storage::RocksStore;
use libfuzzer_sys::fuzz_target;
use tempfile::TempDir;

#[derive(Arbitrary, Debug)]
enum StoreOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Get { key: Vec<u8> },
    Delete { key: Vec<u8> },
    Iterate,
    SnapshotRead,
    Compact { begin: Option<Vec<u8>>, end: Option<Vec<u8>> },
}

fuzz_target!(|ops: Vec<StoreOp>| {
    let dir = TempDir::new().unwrap();
    let store = match RocksStore::open(dir.path()) {
        Ok(store) => store,
        Err(_) => return,
    };

    // Cap op count and argument sizes to keep iterations fast.
    for op in ops.iter().take(64) {
        match op {
            StoreOp::Put { key, value } => {
                if key.len() <= 1024 && value.len() <= 1024 {
                    let _ = store.put(key, value);
                }
            }
            StoreOp::Get { key } => {
                if key.len() <= 1024 {
                    let _ = store.get(key);
                }
            }
            StoreOp::Delete { key } => {
                if key.len() <= 1024 {
                    let _ = store.delete(key);
                }
            }
            StoreOp::Iterate => {
                let _ = store.iterate();
            }
            StoreOp::SnapshotRead => {
                let _ = store.snapshot_read();
            }
            StoreOp::Compact { begin, end } => {
                let _ = store.compact_range(begin.as_deref(), end.as_deref());
            }
        }
    }
});
