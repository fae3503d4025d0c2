//! Run configuration.
//!
//! The harness is driven by a fuzzing driver and takes no arguments, so
//! configuration comes from the environment with compiled defaults.

use std::env;
use std::path::PathBuf;

/// Default root directory of the store under test.
pub const DEFAULT_DB_PATH: &str = "/tmp/kvprobe-db";

/// Default disk budget for the store root before a run wipes it clean.
pub const DEFAULT_MAX_DB_BYTES: u64 = 100 * 1024 * 1024;

/// Configuration for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root directory of the store under test.
    pub db_path: PathBuf,
    /// Disk usage above which the store root is deleted before opening.
    pub max_db_bytes: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_db_bytes: DEFAULT_MAX_DB_BYTES,
        }
    }
}

impl HarnessConfig {
    /// Builds the configuration from the environment, falling back to the
    /// compiled defaults.
    pub fn from_env() -> Self {
        let db_path = env::var("KVPROBE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

        let max_db_bytes = env::var("KVPROBE_MAX_DB_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_DB_BYTES);

        Self {
            db_path,
            max_db_bytes,
        }
    }

    /// Configuration rooted at an explicit path (tests and fuzz targets).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
            ..Self::default()
        }
    }
}
