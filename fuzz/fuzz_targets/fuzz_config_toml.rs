#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and validating a deployer config must never panic
        if let Ok(config) = toml::from_str::<release_deployer::Config>(content) {
            let _ = config.validate();
            let _ = config.deploy.deploy_command();
        }
    }
});
