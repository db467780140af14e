//! Fuzz target: `SupervisorConfig::from_json`
//!
//! Arbitrary bytes must either fail to parse or yield a configuration
//! whose validation returns (never panics).
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use traincontrol::config::SupervisorConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SupervisorConfig::from_json(text) {
        let _ = config.validate();
        let _ = config.uses_builtin();
    }
});
