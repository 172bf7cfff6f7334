use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use stammdaten::core::{RecordError, Sequence, Sequences};
use stammdaten::party::*;
use stammdaten::vat::*;

/// Registry answering from a fixed table and counting its calls.
struct FakeRegistry {
    answers: HashMap<&'static str, Result<bool, ViesFault>>,
    calls: AtomicUsize,
}

impl FakeRegistry {
    fn new(answers: impl IntoIterator<Item = (&'static str, Result<bool, ViesFault>)>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn empty() -> Self {
        Self::new(Vec::<(&'static str, Result<bool, ViesFault>)>::new())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VatRegistry for FakeRegistry {
    async fn check_vat(&self, vat_code: &str) -> Result<bool, ViesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(vat_code) {
            Some(Ok(valid)) => Ok(*valid),
            Some(Err(fault)) => Err(ViesError::Fault(fault.clone())),
            None => Err(ViesError::Network("unexpected code".into())),
        }
    }
}

fn parties() -> Parties {
    let mut seqs = Sequences::new();
    let seq = seqs.add(Sequence::new("party"));
    Parties::new(seqs, PartyConfiguration::new(seq))
}

/// Parties A (BE, valid), B (DE, invalid) and C (no VAT).
fn scenario() -> (Parties, [u64; 3]) {
    let mut p = parties();
    let a = p.create(PartyValues::new("A").vat("BE", "0123456789")).unwrap();
    let b = p.create(PartyValues::new("B").vat("DE", "123456789")).unwrap();
    let c = p.create(PartyValues::new("C")).unwrap();
    (p, [a, b, c])
}

#[tokio::test]
async fn partitions_checked_parties() {
    let (p, [a, b, c]) = scenario();
    let registry = FakeRegistry::new([("BE0123456789", Ok(true)), ("DE123456789", Ok(false))]);
    let wizard = CheckVies::new(&registry);
    assert_eq!(wizard.choice(), CheckViesState::Check);

    let outcome = wizard.run(&p, &[a, b, c]).await.unwrap();
    assert_eq!(
        outcome,
        CheckViesOutcome::Checked(CheckViesResult {
            parties_succeeded: vec![a],
            parties_failed: vec![b],
        })
    );
    // C has no VAT code and is never sent.
    assert_eq!(registry.calls(), 2);
}

#[tokio::test]
async fn transient_fault_aborts_run() {
    let (p, [a, b, _]) = scenario();
    let registry = FakeRegistry::new([
        ("BE0123456789", Err(ViesFault::Timeout)),
        ("DE123456789", Ok(true)),
    ]);
    let err = CheckVies::new(&registry).run(&p, &[a, b]).await.unwrap_err();
    assert!(matches!(err, RecordError::ViesUnavailable));
    assert_eq!(registry.calls(), 1);
}

#[tokio::test]
async fn member_state_unavailable_is_transient() {
    let (p, [a, _, _]) = scenario();
    let registry = FakeRegistry::new([("BE0123456789", Err(ViesFault::MemberStateUnavailable))]);
    let err = CheckVies::new(&registry).run(&p, &[a]).await.unwrap_err();
    assert!(matches!(err, RecordError::ViesUnavailable));
}

#[tokio::test]
async fn invalid_input_counts_as_failed() {
    let (p, [a, b, _]) = scenario();
    let registry = FakeRegistry::new([
        ("BE0123456789", Err(ViesFault::InvalidInput)),
        ("DE123456789", Ok(true)),
    ]);
    let outcome = CheckVies::new(&registry).run(&p, &[a, b]).await.unwrap();
    assert_eq!(
        outcome,
        CheckViesOutcome::Checked(CheckViesResult {
            parties_succeeded: vec![b],
            parties_failed: vec![a],
        })
    );
}

#[tokio::test]
async fn other_fault_is_propagated() {
    let (p, [a, _, _]) = scenario();
    let registry = FakeRegistry::new([(
        "BE0123456789",
        Err(ViesFault::Other("MS_MAX_CONCURRENT_REQ".into())),
    )]);
    let err = CheckVies::new(&registry).run(&p, &[a]).await.unwrap_err();
    assert!(matches!(
        err,
        RecordError::Vies(ViesError::Fault(ViesFault::Other(ref code))) if code == "MS_MAX_CONCURRENT_REQ"
    ));
}

#[tokio::test]
async fn network_error_is_propagated() {
    let (p, [a, _, _]) = scenario();
    let registry = FakeRegistry::empty();
    let err = CheckVies::new(&registry).run(&p, &[a]).await.unwrap_err();
    assert!(matches!(err, RecordError::Vies(ViesError::Network(_))));
}

#[tokio::test]
async fn no_registry_means_no_check() {
    let (p, [a, b, c]) = scenario();
    let wizard = CheckVies::new(NoRegistry);
    assert_eq!(wizard.choice(), CheckViesState::NoCheck);
    assert_eq!(wizard.run(&p, &[a, b, c]).await.unwrap(), CheckViesOutcome::NoCheck);
}

#[tokio::test]
async fn unknown_party_is_an_error() {
    let (p, _) = scenario();
    let registry = FakeRegistry::empty();
    assert!(CheckVies::new(&registry).run(&p, &[99]).await.is_err());
    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn check_accepts_raw_pairs() {
    let registry = FakeRegistry::new([("FR12345678901", Ok(true))]);
    let result = CheckVies::new(&registry)
        .check([(1, "FR12345678901"), (2, "")])
        .await
        .unwrap();
    assert_eq!(result.parties_succeeded, vec![1]);
    assert!(result.parties_failed.is_empty());
}

#[test]
fn result_serializes_with_field_names() {
    let result = CheckViesResult {
        parties_succeeded: vec![1],
        parties_failed: vec![2, 3],
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["parties_succeeded"], serde_json::json!([1]));
    assert_eq!(json["parties_failed"], serde_json::json!([2, 3]));
}
