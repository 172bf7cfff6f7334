use stammdaten::core::{Clause, OrderBy, Sequence, Sequences};
use stammdaten::country::{CountryValues, Geography, StateValues};
use stammdaten::party::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Countries, codes are normalized to upper case
    println!("=== Countries ===\n");

    let mut geo = Geography::new();
    let be = geo.create_country(CountryValues::new("Belgium", "be")).unwrap();
    let de = geo.create_country(CountryValues::new("Germany", "de")).unwrap();
    geo.create_state(StateValues::new(be, "Brussels", "bru")).unwrap();

    for (id, name) in geo.name_search("BE", &[], None, None) {
        let country = geo.country(id).unwrap();
        println!("  {name} ({}), {} state(s)", country.code, geo.states_of(id).len());
    }
    for (_, name) in geo.name_search("many", &[], None, None) {
        println!("  'many' => {name}");
    }

    // Parties with sequence codes
    println!("\n=== Parties ===\n");

    let mut sequences = Sequences::new();
    let seq = sequences.add(Sequence::new("party").with_prefix("C${year}-").with_padding(4));
    let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));

    let customer = parties.create_category(CategoryValues::new("Customer")).unwrap();

    let acme = parties
        .create(
            PartyValues::new("ACME SA")
                .vat("BE", "BE0123456789")
                .contact(ContactType::Email, "info@acme.be")
                .contact(ContactType::Phone, "+32 2 123 45 67")
                .address(AddressValues::new().street("Rue Haute 1").city("1000", "Bruxelles").country(be))
                .address(
                    AddressValues::new()
                        .street("Quai 7")
                        .city("4000", "Liège")
                        .country(be)
                        .for_kind(AddressKind::Invoice),
                )
                .category(customer),
        )
        .unwrap();
    let kunde = parties
        .create(
            PartyValues::new("Kunde AG")
                .vat("DE", "123456789")
                .address(AddressValues::new().city("80331", "München").country(de)),
        )
        .unwrap();

    for view in parties.read_many(&[acme, kunde]).unwrap() {
        println!("  [{}] {}", view.party.code, view.full_name);
        println!("    vat_code={}, email={}, phone={}", view.vat_code, view.email, view.phone);
        if let Some(address) = parties.address_get(view.party.id, Some(AddressKind::Invoice)).unwrap() {
            let address = parties.address(address).unwrap();
            println!("    invoice address: {}", address.city.as_deref().unwrap_or_default());
        }
    }

    // Invalid VAT numbers are refused
    match parties.create(PartyValues::new("Broken").vat("DE", "12")) {
        Ok(_) => println!("\n  unexpected: invalid VAT accepted"),
        Err(e) => println!("\n  rejected: {e}"),
    }

    // Searching
    println!("\n=== Search ===\n");

    let found = parties.search(&[Clause::ilike("vat_code", "be0123")], &[], None);
    println!("  vat_code ilike 'be0123' => {:?}", parties.name_get(&found));

    let found = parties.search(&[Clause::ilike("rec_name", "kunde")], &[], None);
    println!("  rec_name ilike 'kunde'  => {:?}", parties.name_get(&found));

    let found = parties.search(&[], &[OrderBy::desc("code")], None);
    println!("  by code desc            => {:?}", parties.name_get(&found));

    // Copy draws a fresh code
    let copy = parties.copy(&[acme]).unwrap()[0];
    println!("\n  copied ACME => code {}", parties.party(copy).unwrap().code);
}
