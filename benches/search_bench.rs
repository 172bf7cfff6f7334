use criterion::{Criterion, black_box, criterion_group, criterion_main};

use stammdaten::core::{Clause, OrderBy, Sequence, Sequences};
use stammdaten::country::{CountryValues, Geography};
use stammdaten::party::*;
use stammdaten::vat::{EuVatFormat, VatFormatValidator};

fn build_1000_parties() -> Parties {
    let mut sequences = Sequences::new();
    let seq = sequences.add(Sequence::new("party").with_prefix("C"));
    let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));
    for i in 1..=1000u32 {
        let values = PartyValues::new(format!("Party {i:04}"))
            .vat("BE", format!("0{:09}", 100_000_000 + i))
            .contact(ContactType::Email, format!("party{i}@example.com"))
            .address(AddressValues::new().city("1000", "Bruxelles"));
        parties.create(values).unwrap();
    }
    parties
}

fn build_geography() -> Geography {
    let mut geo = Geography::new();
    for (name, code) in [
        ("Austria", "at"),
        ("Belgium", "be"),
        ("Germany", "de"),
        ("France", "fr"),
        ("Italy", "it"),
        ("Netherlands", "nl"),
        ("Spain", "es"),
    ] {
        geo.create_country(CountryValues::new(name, code)).unwrap();
    }
    geo
}

fn bench_create_party(c: &mut Criterion) {
    c.bench_function("create_1000_parties", |b| {
        b.iter(|| black_box(build_1000_parties()));
    });
}

fn bench_search_vat_code(c: &mut Criterion) {
    let parties = build_1000_parties();
    let domain = [Clause::ilike("vat_code", "be0100000")];
    c.bench_function("search_vat_code", |b| {
        b.iter(|| black_box(parties.search(black_box(&domain), &[], None)));
    });
}

fn bench_search_order_by_code(c: &mut Criterion) {
    let parties = build_1000_parties();
    let order = [OrderBy::asc("code")];
    c.bench_function("search_order_by_code", |b| {
        b.iter(|| black_box(parties.search(&[], black_box(&order), Some(80))));
    });
}

fn bench_read_party(c: &mut Criterion) {
    let parties = build_1000_parties();
    let ids = parties.search(&[], &[], Some(100));
    c.bench_function("read_100_parties", |b| {
        b.iter(|| black_box(parties.read_many(black_box(&ids))));
    });
}

fn bench_country_name_search(c: &mut Criterion) {
    let geo = build_geography();
    c.bench_function("country_name_search", |b| {
        b.iter(|| {
            black_box(geo.name_search(black_box("BE"), &[], None, None));
            black_box(geo.name_search(black_box("land"), &[], None, None))
        });
    });
}

fn bench_vat_format(c: &mut Criterion) {
    let format = EuVatFormat::new();
    c.bench_function("vat_check_format", |b| {
        b.iter(|| {
            black_box(format.check_format(black_box("BE"), black_box("0123456789")));
            black_box(format.check_format(black_box("NL"), black_box("123456789B01")))
        });
    });
}

criterion_group!(
    benches,
    bench_create_party,
    bench_search_vat_code,
    bench_search_order_by_code,
    bench_read_party,
    bench_country_name_search,
    bench_vat_format,
);
criterion_main!(benches);
