#![no_main]
use huff::{compress_bytes, decompress_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let packed = compress_bytes(data).unwrap();
    let unpacked = decompress_bytes(&packed).unwrap();
    assert_eq!(data, &unpacked[..]);
});
