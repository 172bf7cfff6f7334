use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Kind of a contact mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Phone,
    Mobile,
    Fax,
    Email,
    Website,
    Skype,
    Sip,
    Irc,
    Jabber,
    Other,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Mobile => "mobile",
            Self::Fax => "fax",
            Self::Email => "email",
            Self::Website => "website",
            Self::Skype => "skype",
            Self::Sip => "sip",
            Self::Irc => "irc",
            Self::Jabber => "jabber",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phone number, e-mail address, website, ... of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMechanism {
    pub id: Id,
    pub party: Id,
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub value: String,
    pub comment: Option<String>,
    pub sequence: Option<i64>,
    pub active: bool,
}

impl Default for ContactMechanism {
    fn default() -> Self {
        Self {
            id: 0,
            party: 0,
            kind: ContactType::default(),
            value: String::new(),
            comment: None,
            sequence: None,
            active: true,
        }
    }
}

/// Values for creating or writing a [`ContactMechanism`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMechanismValues {
    pub party: Option<Id>,
    #[serde(rename = "type")]
    pub kind: Option<ContactType>,
    pub value: Option<String>,
    pub comment: Option<Option<String>>,
    pub sequence: Option<Option<i64>>,
    pub active: Option<bool>,
}

impl ContactMechanismValues {
    pub fn new(kind: ContactType, value: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(Some(sequence));
        self
    }
}

impl Changes<ContactMechanism> for ContactMechanismValues {
    fn apply(&self, record: &mut ContactMechanism) {
        if let Some(party) = self.party {
            record.party = party;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(value) = &self.value {
            record.value = value.clone();
        }
        if let Some(comment) = &self.comment {
            record.comment = comment.clone();
        }
        if let Some(sequence) = self.sequence {
            record.sequence = sequence;
        }
        if let Some(active) = self.active {
            record.active = active;
        }
    }
}

impl Record for ContactMechanism {
    type Values = ContactMechanismValues;
    const MODEL: &'static str = "party.contact_mechanism";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "party" => self.party.into(),
            "type" => self.kind.as_str().into(),
            "value" => self.value.as_str().into(),
            "comment" => self.comment.as_deref().into(),
            "sequence" => self.sequence.into(),
            "active" => self.active.into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> ContactMechanismValues {
        ContactMechanismValues {
            party: Some(self.party),
            kind: Some(self.kind),
            value: Some(self.value.clone()),
            comment: Some(self.comment.clone()),
            sequence: Some(self.sequence),
            active: Some(self.active),
        }
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.party == 0 {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "party",
            });
        }
        if self.value.trim().is_empty() {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "value",
            });
        }
        Ok(())
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("sequence"), OrderBy::asc("id")]
    }
}
