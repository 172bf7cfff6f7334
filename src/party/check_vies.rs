//! "Check VIES" workflow over a selection of parties.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::parties::Parties;
use crate::core::{Id, RecordError};
use crate::vat::{VatRegistry, ViesError, ViesFault};

/// Where the workflow goes from its initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckViesState {
    /// No registry available; show an informational message.
    NoCheck,
    /// Check every selected party against the registry.
    Check,
}

/// Parties partitioned by registry answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckViesResult {
    pub parties_succeeded: Vec<Id>,
    pub parties_failed: Vec<Id>,
}

/// Terminal state reached by [`CheckVies::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckViesOutcome {
    NoCheck,
    Checked(CheckViesResult),
}

/// Checks the VAT codes of parties against a [`VatRegistry`].
///
/// Checks run one after another. A transient registry fault aborts the
/// whole run with [`RecordError::ViesUnavailable`]; an invalid-input fault
/// counts as a failed check; any other error is returned unchanged.
pub struct CheckVies<R> {
    registry: R,
}

impl<R: VatRegistry> CheckVies<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Initial dispatch.
    pub fn choice(&self) -> CheckViesState {
        if self.registry.is_available() {
            CheckViesState::Check
        } else {
            CheckViesState::NoCheck
        }
    }

    /// Check `(party, vat_code)` pairs. Empty VAT codes are skipped.
    pub async fn check<'a, I>(&self, parties: I) -> Result<CheckViesResult, RecordError>
    where
        I: IntoIterator<Item = (Id, &'a str)>,
    {
        let mut result = CheckViesResult::default();
        for (id, vat_code) in parties {
            if vat_code.is_empty() {
                continue;
            }
            match self.registry.check_vat(vat_code).await {
                Ok(true) => result.parties_succeeded.push(id),
                Ok(false) => result.parties_failed.push(id),
                Err(ViesError::Fault(ViesFault::InvalidInput)) => result.parties_failed.push(id),
                Err(ViesError::Fault(fault)) if fault.is_transient() => {
                    warn!(party = id, %fault, "VIES unavailable, check aborted");
                    return Err(RecordError::ViesUnavailable);
                }
                Err(e) => return Err(e.into()),
            }
        }
        info!(
            succeeded = result.parties_succeeded.len(),
            failed = result.parties_failed.len(),
            "VIES check finished"
        );
        Ok(result)
    }

    /// Run the workflow on the parties `ids`.
    pub async fn run(&self, parties: &Parties, ids: &[Id]) -> Result<CheckViesOutcome, RecordError> {
        match self.choice() {
            CheckViesState::NoCheck => {
                warn!("no VAT registry available, VIES check skipped");
                Ok(CheckViesOutcome::NoCheck)
            }
            CheckViesState::Check => {
                let views = parties.read_many(ids)?;
                let codes = views.iter().map(|v| (v.party.id, v.vat_code.as_str()));
                Ok(CheckViesOutcome::Checked(self.check(codes).await?))
            }
        }
    }
}
