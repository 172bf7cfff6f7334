use serde::{Deserialize, Serialize};

use crate::core::{RecordError, SequenceId};

/// Singleton party settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfiguration {
    /// Sequence drawing codes for parties created without one.
    pub party_sequence: Option<SequenceId>,
}

impl PartyConfiguration {
    pub fn new(party_sequence: SequenceId) -> Self {
        Self {
            party_sequence: Some(party_sequence),
        }
    }

    pub fn party_sequence(&self) -> Result<SequenceId, RecordError> {
        self.party_sequence
            .ok_or_else(|| RecordError::Sequence("no party sequence configured".into()))
    }
}
