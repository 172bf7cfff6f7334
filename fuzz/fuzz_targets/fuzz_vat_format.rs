#![no_main]

use libfuzzer_sys::fuzz_target;
use stammdaten::vat::{EuVatFormat, VatFormatValidator};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let format = EuVatFormat::new();
        // Must not panic, any verdict is fine.
        let _ = format.check_format("BE", s);
        if let Some((country, number)) = s.split_at_checked(2) {
            let _ = format.check_format(country, number);
        }
    }
});
