#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic: rejection is fine, panics are bugs.
        let v = vatin::VatValidator::new();
        let verdict = v.verdict(Some(s));
        assert_eq!(verdict.is_accepted(), v.is_valid(Some(s)));

        let once = vatin::normalize(s);
        assert_eq!(vatin::normalize(&once), once);
    }
});
