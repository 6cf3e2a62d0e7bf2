#![no_main]

use bacwire_core::apdu::Apdu;
use bacwire_core::encoding::{reader::Reader, writer::Writer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    if let Ok(apdu) = Apdu::decode(&mut r) {
        let mut w = Writer::new();
        let _ = apdu.encode(&mut w);
    }
});
