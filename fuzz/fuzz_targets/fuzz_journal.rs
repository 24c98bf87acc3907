// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for journal snapshot decoding

#![no_main]

use libfuzzer_sys::fuzz_target;
use jk_cache::journal::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // arbitrary bytes must decode or be rejected, never panic
    if let Ok(cache) = decode(data) {
        let encoded = encode(&cache).expect("decoded snapshot re-encodes");
        let decoded = decode(&encoded).expect("encoded snapshot decodes");
        assert_eq!(decoded.entries(), cache.entries());
    }
});
