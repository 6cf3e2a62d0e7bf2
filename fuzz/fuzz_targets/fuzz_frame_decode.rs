#![no_main]

use bacwire_core::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = decode_frame(data) {
        if let Ok(bytes) = frame.encode() {
            assert!(decode_frame(&bytes).is_ok());
        }
    }
});
