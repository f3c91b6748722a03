#![no_main]

use libfuzzer_sys::fuzz_target;
use rukozop_bench::{BenchConfig, Unit};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(unit) = text.parse::<Unit>() {
            assert_eq!(unit.suffix().parse::<Unit>().ok(), Some(unit));
        }
        if let Ok(config) = BenchConfig::from_json_str(text) {
            assert!(config.repetitions > 0);
        }
    }
});
