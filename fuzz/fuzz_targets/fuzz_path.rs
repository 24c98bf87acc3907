// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for KeeperPath normalization and resolution

#![no_main]

use libfuzzer_sys::fuzz_target;
use jk_core::path::KeeperPath;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let Ok(base) = KeeperPath::new("/fuzz/root") else {
            return;
        };

        let resolved = base.resolve(input);

        // resolution always stays absolute and is idempotent
        assert!(resolved.as_path().is_absolute());
        let again = KeeperPath::new(resolved.as_path()).expect("resolved path is absolute");
        assert_eq!(again, resolved);

        let _ = resolved.name();
        let _ = resolved.parent();
        let _ = resolved.to_key();

        if let Some(parent) = resolved.parent() {
            assert!(resolved.starts_with(&parent));
        }
    }
});
