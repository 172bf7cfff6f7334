use stammdaten::core::{Sequence, Sequences};
use stammdaten::party::*;
use stammdaten::vat::{ViesClient, ViesConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut sequences = Sequences::new();
    let seq = sequences.add(Sequence::new("party"));
    let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));

    let ids = [
        parties.create(PartyValues::new("Registered").vat("BE", "0403170701")).unwrap(),
        parties.create(PartyValues::new("Unknown").vat("DE", "123456789")).unwrap(),
        parties.create(PartyValues::new("No VAT")).unwrap(),
    ];

    // Direct lookup, with the registered name and address
    let client = ViesClient::new(ViesConfig::default()).unwrap();
    println!("=== VIES lookup (network) ===\n");
    match client.check("BE", "0403170701").await {
        Ok(result) => {
            println!("  BE0403170701 => valid={}", result.valid);
            if let Some(name) = &result.name {
                println!("    name: {name}");
            }
        }
        Err(e) => println!("  BE0403170701 => error: {e}"),
    }

    // Check VIES workflow over the selected parties
    println!("\n=== Check VIES ===\n");
    let wizard = CheckVies::new(client);
    match wizard.run(&parties, &ids).await {
        Ok(CheckViesOutcome::Checked(result)) => {
            println!("  succeeded: {:?}", parties.name_get(&result.parties_succeeded));
            println!("  failed:    {:?}", parties.name_get(&result.parties_failed));
        }
        Ok(CheckViesOutcome::NoCheck) => println!("  no registry available"),
        Err(e) => println!("  check aborted: {e}"),
    }
}
