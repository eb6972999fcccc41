#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    hardy_cbor_lite_fuzz::walk_all(data);
});
