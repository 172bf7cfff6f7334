use stammdaten::core::{Clause, Operator, OrderBy, RecordError, Sequence, Sequences};
use stammdaten::party::*;

fn parties() -> Parties {
    let mut seqs = Sequences::new();
    let seq = seqs.add(Sequence::new("party"));
    Parties::new(seqs, PartyConfiguration::new(seq))
}

// ---------------------------------------------------------------------------
// Codes
// ---------------------------------------------------------------------------

#[test]
fn code_drawn_from_sequence() {
    let mut p = parties();
    let a = p.create(PartyValues::new("Alpha")).unwrap();
    let b = p.create(PartyValues::new("Beta")).unwrap();
    assert_eq!(p.party(a).unwrap().code, "1");
    assert_eq!(p.party(b).unwrap().code, "2");
    assert_eq!(p.party(b).unwrap().code_length, 1);
}

#[test]
fn code_uses_sequence_formatting() {
    let mut seqs = Sequences::new();
    let seq = seqs.add(
        Sequence::starting_at("party", 42)
            .with_prefix("P-")
            .with_padding(5),
    );
    let mut p = Parties::new(seqs, PartyConfiguration::new(seq));
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    assert_eq!(p.party(id).unwrap().code, "P-00042");
    assert_eq!(p.party(id).unwrap().code_length, 7);
}

#[test]
fn explicit_code_is_kept() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha").code("ACME-01")).unwrap();
    assert_eq!(p.party(id).unwrap().code, "ACME-01");
    assert_eq!(p.party(id).unwrap().code_length, 7);
    // The sequence was not consumed.
    let next = p.create(PartyValues::new("Beta")).unwrap();
    assert_eq!(p.party(next).unwrap().code, "1");
}

#[test]
fn empty_code_draws_from_sequence() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha").code("")).unwrap();
    assert_eq!(p.party(id).unwrap().code, "1");
}

#[test]
fn code_length_counts_characters() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha").code("ÄÖÜ")).unwrap();
    assert_eq!(p.party(id).unwrap().code_length, 3);
}

#[test]
fn code_length_follows_written_code() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    p.write(&[id], PartyValues::default().code("LONGER")).unwrap();
    assert_eq!(p.party(id).unwrap().code_length, 6);
    p.write(&[id], PartyValues::default().lang("fr_BE")).unwrap();
    assert_eq!(p.party(id).unwrap().code_length, 6);
}

#[test]
fn rejected_create_keeps_sequence() {
    let mut p = parties();
    let err = p.create(PartyValues::new("Bad").vat("BE", "12")).unwrap_err();
    assert!(matches!(err, RecordError::InvalidVat { .. }));
    assert!(p.create(PartyValues::default()).is_err());
    p.create(PartyValues::new("Taken").code("X")).unwrap();
    assert!(p.create(PartyValues::new("Clash").code("X")).is_err());

    let id = p.create(PartyValues::new("Good")).unwrap();
    assert_eq!(p.party(id).unwrap().code, "1");
}

#[test]
fn code_length_cannot_be_written() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    let mut values = PartyValues::default();
    values.code_length = Some(42);
    p.write(&[id], values).unwrap();
    assert_eq!(p.party(id).unwrap().code, "1");
    assert_eq!(p.party(id).unwrap().code_length, 1);

    let mut values = PartyValues::new("Beta").code("ABC");
    values.code_length = Some(42);
    let id = p.create(values).unwrap();
    assert_eq!(p.party(id).unwrap().code_length, 3);
}

#[test]
fn duplicate_code_rejected() {
    let mut p = parties();
    p.create(PartyValues::new("Alpha").code("X")).unwrap();
    let err = p.create(PartyValues::new("Beta").code("X")).unwrap_err();
    assert!(matches!(err, RecordError::Unique { field: "code", .. }));
}

#[test]
fn missing_sequence_configuration() {
    let mut p = Parties::new(Sequences::new(), PartyConfiguration::default());
    let err = p.create(PartyValues::new("Alpha")).unwrap_err();
    assert!(matches!(err, RecordError::Sequence(_)));
}

#[test]
fn name_required() {
    let mut p = parties();
    let err = p.create(PartyValues::default()).unwrap_err();
    assert!(matches!(err, RecordError::Required { field: "name", .. }));
}

// ---------------------------------------------------------------------------
// Ordering and search
// ---------------------------------------------------------------------------

#[test]
fn codes_sort_by_length_then_value() {
    let mut p = parties();
    let ten = p.create(PartyValues::new("Ten").code("10")).unwrap();
    let nine = p.create(PartyValues::new("Nine").code("9")).unwrap();
    let two = p.create(PartyValues::new("Two").code("2")).unwrap();
    assert_eq!(p.search(&[], &[OrderBy::asc("code")], None), vec![two, nine, ten]);
    assert_eq!(p.search(&[], &[OrderBy::desc("code")], None), vec![ten, nine, two]);
}

#[test]
fn default_order_is_name() {
    let mut p = parties();
    let z = p.create(PartyValues::new("Zeta")).unwrap();
    let a = p.create(PartyValues::new("Alpha")).unwrap();
    assert_eq!(p.search(&[], &[], None), vec![a, z]);
}

#[test]
fn search_by_vat_code_with_prefix() {
    let mut p = parties();
    let be = p.create(PartyValues::new("ACME").vat("BE", "0123456789")).unwrap();
    p.create(PartyValues::new("Other").vat("DE", "123456789")).unwrap();

    assert_eq!(p.search(&[Clause::eq("vat_code", "BE0123456789")], &[], None), vec![be]);
    assert_eq!(p.search(&[Clause::ilike("vat_code", "be01234")], &[], None), vec![be]);
}

#[test]
fn search_by_vat_code_without_prefix() {
    let mut p = parties();
    let be = p.create(PartyValues::new("ACME").vat("BE", "0123456789")).unwrap();
    let de = p.create(PartyValues::new("Other").vat("DE", "123456789")).unwrap();
    let mut found = p.search(&[Clause::ilike("vat_code", "12345")], &[], None);
    found.sort();
    assert_eq!(found, vec![be, de]);
}

#[test]
fn search_rec_name_by_code_or_name() {
    let mut p = parties();
    let a = p.create(PartyValues::new("Alpha").code("AB")).unwrap();
    let b = p.create(PartyValues::new("Cabinet").code("C1")).unwrap();
    let c = p.create(PartyValues::new("Delta").code("D1")).unwrap();

    // "ab" matches Alpha by code and Cabinet by name.
    let found = p.search(&[Clause::ilike("rec_name", "ab")], &[], None);
    assert_eq!(found, vec![a, b]);

    // No code matches "elt": name only.
    assert_eq!(p.search(&[Clause::ilike("rec_name", "elt")], &[], None), vec![c]);
}

#[test]
fn name_get_skips_unknown_ids() {
    let mut p = parties();
    let a = p.create(PartyValues::new("Alpha")).unwrap();
    assert_eq!(p.name_get(&[a, 99]), vec![(a, "Alpha".to_string())]);
}

#[test]
fn inactive_parties_are_searchable_by_flag() {
    let mut p = parties();
    let a = p.create(PartyValues::new("Alpha")).unwrap();
    let b = p.create(PartyValues::new("Beta").active(false)).unwrap();
    assert_eq!(p.search(&[Clause::eq("active", true)], &[], None), vec![a]);
    assert_eq!(p.search(&[Clause::eq("active", false)], &[], None), vec![b]);
}

// ---------------------------------------------------------------------------
// Computed fields
// ---------------------------------------------------------------------------

#[test]
fn first_contact_of_each_type() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .contact(ContactType::Phone, "+32 2 000 00 01")
                .contact(ContactType::Email, "info@alpha.be")
                .contact(ContactType::Phone, "+32 2 000 00 02")
                .contact(ContactType::Website, "alpha.be"),
        )
        .unwrap();
    let view = p.read(id).unwrap();
    assert_eq!(view.phone, "+32 2 000 00 01");
    assert_eq!(view.email, "info@alpha.be");
    assert_eq!(view.website, "alpha.be");
    assert_eq!(view.mobile, "");
    assert_eq!(view.fax, "");
    assert_eq!(view.full_name, "Alpha");
    assert_eq!(view.contact_mechanisms.len(), 4);
}

#[test]
fn contact_sequence_decides_first() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    p.write(
        &[id],
        PartyValues {
            contact_mechanisms: vec![
                ContactMechanismValues::new(ContactType::Mobile, "later").sequence(20),
                ContactMechanismValues::new(ContactType::Mobile, "sooner").sequence(10),
            ],
            ..PartyValues::default()
        },
    )
    .unwrap();
    assert_eq!(p.read(id).unwrap().mobile, "sooner");
}

#[test]
fn contact_value_required() {
    let mut p = parties();
    let err = p
        .create(PartyValues::new("Alpha").contact(ContactType::Email, ""))
        .unwrap_err();
    assert!(matches!(err, RecordError::Required { field: "value", .. }));
    // Nothing was stored.
    assert!(p.search(&[], &[], None).is_empty());
}

#[test]
fn contact_on_existing_party() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    let mut values = ContactMechanismValues::new(ContactType::Fax, "+32 2 000 00 09");
    values.party = Some(id);
    let cm = p.create_contact_mechanism(values).unwrap();
    assert_eq!(p.contact_mechanism(cm).unwrap().party, id);
    assert_eq!(p.read(id).unwrap().fax, "+32 2 000 00 09");

    let mut orphan = ContactMechanismValues::new(ContactType::Fax, "x");
    orphan.party = Some(99);
    assert!(matches!(
        p.create_contact_mechanism(orphan),
        Err(RecordError::NotFound { id: 99, .. })
    ));
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

#[test]
fn address_get_prefers_flagged_address() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles"))
                .address(AddressValues::new().city("4000", "Liège").for_kind(AddressKind::Invoice))
                .address(AddressValues::new().city("9000", "Gent").for_kind(AddressKind::Delivery)),
        )
        .unwrap();
    let addresses = p.read(id).unwrap().addresses;
    assert_eq!(addresses.len(), 3);

    assert_eq!(p.address_get(id, None).unwrap(), Some(addresses[0]));
    assert_eq!(p.address_get(id, Some(AddressKind::Invoice)).unwrap(), Some(addresses[1]));
    assert_eq!(p.address_get(id, Some(AddressKind::Delivery)).unwrap(), Some(addresses[2]));
}

#[test]
fn address_get_falls_back_to_first_address() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles").sequence(2))
                .address(AddressValues::new().city("4000", "Liège").sequence(1)),
        )
        .unwrap();
    let first = p.address_get(id, Some(AddressKind::Invoice)).unwrap().unwrap();
    assert_eq!(p.address(first).unwrap().city.as_deref(), Some("Liège"));
}

#[test]
fn address_get_ignores_inactive_addresses() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles").active(false)),
        )
        .unwrap();
    assert_eq!(p.address_get(id, None).unwrap(), None);
    assert!(p.read(id).unwrap().addresses.is_empty());
}

#[test]
fn address_get_unknown_party() {
    let p = parties();
    assert!(p.address_get(7, None).is_err());
}

#[test]
fn unsequenced_addresses_sort_last() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles"))
                .address(AddressValues::new().city("4000", "Liège").sequence(5)),
        )
        .unwrap();
    let addresses = p.read(id).unwrap().addresses;
    assert_eq!(p.address(addresses[0]).unwrap().city.as_deref(), Some("Liège"));
}

#[test]
fn write_address_flags() {
    let mut p = parties();
    let id = p
        .create(PartyValues::new("Alpha").address(AddressValues::new().city("1000", "Bruxelles")))
        .unwrap();
    let address = p.read(id).unwrap().addresses[0];
    p.write_addresses(&[address], AddressValues::new().for_kind(AddressKind::Invoice))
        .unwrap();
    assert!(p.address(address).unwrap().invoice);
    assert!(!p.address(address).unwrap().delivery);
}

#[test]
fn write_clears_address_sequence() {
    let mut p = parties();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles"))
                .address(AddressValues::new().city("4000", "Liège").sequence(5)),
        )
        .unwrap();
    let liege = p.read(id).unwrap().addresses[0];
    p.write_addresses(
        &[liege],
        AddressValues {
            sequence: Some(None),
            ..AddressValues::default()
        },
    )
    .unwrap();
    assert_eq!(p.address(liege).unwrap().sequence, None);
    assert_eq!(p.address(liege).unwrap().city.as_deref(), Some("Liège"));
    // Both unsequenced now, so creation order decides.
    assert_eq!(p.read(id).unwrap().addresses[1], liege);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[test]
fn categories_linked_and_replaced() {
    let mut p = parties();
    let customer = p.create_category(CategoryValues::new("Customer")).unwrap();
    let supplier = p.create_category(CategoryValues::new("Supplier")).unwrap();
    let id = p
        .create(PartyValues::new("Alpha").category(customer).category(customer))
        .unwrap();
    assert_eq!(p.categories_of(id), vec![customer]);

    p.write(&[id], PartyValues::default().category(supplier)).unwrap();
    assert_eq!(p.read(id).unwrap().categories, vec![supplier]);
}

#[test]
fn unknown_category_rejected() {
    let mut p = parties();
    let err = p.create(PartyValues::new("Alpha").category(5)).unwrap_err();
    assert!(matches!(err, RecordError::NotFound { id: 5, .. }));
    assert!(p.search(&[], &[], None).is_empty());
}

#[test]
fn duplicate_category_name_rejected() {
    let mut p = parties();
    p.create_category(CategoryValues::new("Customer")).unwrap();
    assert!(p.create_category(CategoryValues::new("Customer")).is_err());
}

#[test]
fn deleting_category_unlinks_parties() {
    let mut p = parties();
    let customer = p.create_category(CategoryValues::new("Customer")).unwrap();
    let id = p.create(PartyValues::new("Alpha").category(customer)).unwrap();
    p.delete_categories(&[customer]).unwrap();
    assert!(p.categories_of(id).is_empty());
    assert!(p.category(customer).is_err());
}

// ---------------------------------------------------------------------------
// Copy and delete
// ---------------------------------------------------------------------------

#[test]
fn copy_draws_new_code_and_duplicates_children() {
    let mut p = parties();
    let customer = p.create_category(CategoryValues::new("Customer")).unwrap();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .vat("BE", "0123456789")
                .address(AddressValues::new().city("1000", "Bruxelles"))
                .contact(ContactType::Email, "info@alpha.be")
                .category(customer),
        )
        .unwrap();

    let copies = p.copy(&[id]).unwrap();
    assert_eq!(copies.len(), 1);
    let original = p.read(id).unwrap();
    let copy = p.read(copies[0]).unwrap();

    assert_eq!(copy.party.name, "Alpha");
    assert_eq!(copy.party.code, "2");
    assert_ne!(copy.party.code, original.party.code);
    assert_eq!(copy.vat_code, original.vat_code);
    assert_eq!(copy.email, "info@alpha.be");
    assert_eq!(copy.categories, vec![customer]);
    assert_eq!(copy.addresses.len(), 1);
    assert_ne!(copy.addresses, original.addresses);
    assert_eq!(p.address(copy.addresses[0]).unwrap().party, copies[0]);
}

#[test]
fn copy_with_unknown_party_copies_nothing() {
    let mut p = parties();
    let id = p
        .create(PartyValues::new("Alpha").address(AddressValues::new().city("1000", "Bruxelles")))
        .unwrap();
    assert!(matches!(p.copy(&[id, 99]), Err(RecordError::NotFound { id: 99, .. })));
    assert_eq!(p.search(&[], &[], None), vec![id]);
    // The sequence was not touched either.
    let next = p.create(PartyValues::new("Beta")).unwrap();
    assert_eq!(p.party(next).unwrap().code, "2");
}

#[test]
fn delete_cascades_to_children() {
    let mut p = parties();
    let customer = p.create_category(CategoryValues::new("Customer")).unwrap();
    let id = p
        .create(
            PartyValues::new("Alpha")
                .address(AddressValues::new().city("1000", "Bruxelles"))
                .contact(ContactType::Email, "info@alpha.be")
                .category(customer),
        )
        .unwrap();
    let view = p.read(id).unwrap();

    p.delete(&[id]).unwrap();
    assert!(p.party(id).is_err());
    assert!(p.address(view.addresses[0]).is_err());
    assert!(p.contact_mechanism(view.contact_mechanisms[0]).is_err());
    assert!(p.categories_of(id).is_empty());
    // The category itself survives.
    assert!(p.category(customer).is_ok());
}

#[test]
fn delete_unknown_party_changes_nothing() {
    let mut p = parties();
    let id = p.create(PartyValues::new("Alpha")).unwrap();
    assert!(p.delete(&[id, 42]).is_err());
    assert!(p.party(id).is_ok());
}

#[test]
fn write_many_parties() {
    let mut p = parties();
    let a = p.create(PartyValues::new("Alpha")).unwrap();
    let b = p.create(PartyValues::new("Beta")).unwrap();
    p.write(&[a, b], PartyValues::default().lang("de_DE")).unwrap();
    let found = p.search(
        &[Clause::new("lang", Operator::Eq, "de_DE")],
        &[],
        None,
    );
    assert_eq!(found, vec![a, b]);
}
