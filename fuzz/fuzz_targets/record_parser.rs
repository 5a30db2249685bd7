#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce records or an error, never a panic
    if let Ok(records) = cotejo::loader::parse_records(data) {
        for record in &records {
            let _ = record.instance_name();
        }
    }
});
