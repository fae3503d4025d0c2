mod rocks;

pub use rocks::RocksStore;
