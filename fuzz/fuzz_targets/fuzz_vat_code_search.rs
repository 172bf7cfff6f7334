#![no_main]

use libfuzzer_sys::fuzz_target;
use stammdaten::core::{Clause, Sequence, Sequences};
use stammdaten::party::{Parties, PartyConfiguration, PartyValues};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut sequences = Sequences::new();
        let seq = sequences.add(Sequence::new("party"));
        let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));
        let _ = parties.create(PartyValues::new("ACME").vat("BE", s));
        let _ = parties.search(&[Clause::ilike("vat_code", s)], &[], None);
        let _ = parties.search(&[Clause::ilike("rec_name", s)], &[], None);
    }
});
