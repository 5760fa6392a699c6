#![no_main]
use huff::{decompress_bytes, HUFF_TREE};
use libfuzzer_sys::fuzz_target;

// Arbitrary bodies behind a valid magic: must error or succeed, never panic.
fuzz_target!(|data: &[u8]| {
    let mut stream = HUFF_TREE.to_be_bytes().to_vec();
    stream.extend_from_slice(data);
    let _ = decompress_bytes(&stream);
});
