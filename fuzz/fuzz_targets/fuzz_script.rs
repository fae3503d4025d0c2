#![no_main]

use kvprobe::config::HarnessConfig;
use kvprobe::harness::{Harness, Script};
use libfuzzer_sys::fuzz_target;
use tempfile::TempDir;

fuzz_target!(|data: &[u8]| {
    // Fresh store root per iteration keeps runs independent.
    let dir = TempDir::new().unwrap();
    let config = HarnessConfig::at_path(dir.path());

    // Invalid UTF-8 becomes replacement chars; still a valid script.
    let input = String::from_utf8_lossy(data);
    let script = Script::parse(&input);

    let mut harness = match Harness::open(&config) {
        Ok(harness) => harness,
        Err(_) => return,
    };

    // Dispatch must never panic, whatever the scripted fields contain.
    let _ = harness.run(&script);
});
