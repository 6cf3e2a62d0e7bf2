#![no_main]

use bacwire_core::encoding::reader::Reader;
use bacwire_core::services::property::read_properties;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&tag_num, rest)) = data.split_first() else {
        return;
    };
    let mut r = Reader::new(rest);
    let _ = read_properties(&mut r, tag_num % 15);
});
