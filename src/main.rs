use std::io::{self, Read, Write};

use tracing_subscriber::EnvFilter;

use kvprobe::config::HarnessConfig;
use kvprobe::disk_usage;
use kvprobe::harness::{Harness, Script};

/// One process instance performs exactly one scripted operation and
/// exits 0 on every path; crashes are the fuzzing signal, not exit
/// codes.
fn main() {
    // Stdout is reserved for the Get output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kvprobe=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = HarnessConfig::from_env();

    if let Err(err) = disk_usage::reset_if_oversized(&config.db_path, config.max_db_bytes) {
        tracing::warn!("Failed to reset store root: {}", err);
    }

    let mut raw = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut raw) {
        tracing::warn!("Failed to read scripted input: {}", err);
    }
    let input = String::from_utf8_lossy(&raw);
    let script = Script::parse(&input);

    let mut harness = match Harness::open(&config) {
        Ok(harness) => harness,
        Err(err) => {
            tracing::debug!("Open failed, ending run: {}", err);
            return;
        }
    };

    match harness.run(&script) {
        Ok(Some(value)) => {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(&value);
            let _ = stdout.write_all(b"\n");
        }
        Ok(None) => {}
        Err(err) => tracing::debug!("Run ended early: {}", err),
    }
}
