#![no_main]

use libfuzzer_sys::fuzz_target;
use modtrace::{ModuleFilter, Tracer};

fuzz_target!(|data: &[u8]| {
    // Malformed records, UTF-8 or not, are skipped; a run never aborts
    let mut tracer = Tracer::new(ModuleFilter::all(), std::io::sink());
    assert!(tracer.run(data).is_ok());
});
