#![no_main]

use libfuzzer_sys::fuzz_target;
use release_deployer::domain::services::{locate_top_level, TopLevelEntry};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut lines = text.lines();
    let prefix = lines.next().unwrap_or_default();
    let entries: Vec<TopLevelEntry> = lines
        .map(|line| match line.strip_suffix('/') {
            Some(dir) => TopLevelEntry::dir(dir),
            None => TopLevelEntry::file(line),
        })
        .collect();
    let _ = locate_top_level(&entries, prefix);
});
