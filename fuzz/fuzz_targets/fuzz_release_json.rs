#![no_main]

use libfuzzer_sys::fuzz_target;
use release_deployer::domain::services::{select_asset, select_payload};
use release_deployer::infrastructure::github::parse_release;
use release_deployer::StagingStrategy;

fuzz_target!(|data: &[u8]| {
    if let Ok(release) = parse_release(data, "v1.0.0") {
        if let Ok(asset) = select_asset(&release) {
            for strategy in [StagingStrategy::Bundle, StagingStrategy::Asset] {
                let _ = select_payload(&release, asset, strategy);
            }
        }
    }
});
