#![no_main]

use libfuzzer_sys::fuzz_target;
use modtrace::classifier::ModuleClassifier;
use modtrace::presets::PresetTable;
use modtrace::{FilterConfig, FilterOptions, ModuleFilter};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Line 1: good list, line 2: bad regex, rest: module name.
        // Neither building nor evaluating may panic.
        let mut parts = input.splitn(3, '\n');
        let options = FilterOptions {
            good: parts.next().unwrap_or_default().to_string(),
            bad_regex: parts.next().unwrap_or_default().to_string(),
            ..Default::default()
        };
        if let Ok(config) = FilterConfig::from_options(&options) {
            let filter =
                ModuleFilter::new(config, ModuleClassifier::default(), PresetTable::default());
            let _ = filter.should_trace(parts.next().unwrap_or_default());
        }
    }
});
