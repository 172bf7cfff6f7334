use serde::{Deserialize, Serialize};

use super::country::{NAME_SIZE, required_text};
use super::normalize::CodeField;
use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Subdivision of a country (state, province, canton, ...).
///
/// Codes are not unique within a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: Id,
    /// Owning country. `0` means unset and fails validation.
    pub country: Id,
    pub name: String,
    /// Up to three letters, stored upper-case.
    pub code: String,
}

/// Partial values for creating or writing a [`State`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateValues {
    pub country: Option<Id>,
    pub name: Option<String>,
    pub code: Option<String>,
}

impl StateValues {
    pub fn new(country: Id, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            country: Some(country),
            name: Some(name.into()),
            code: Some(code.into()),
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

impl CodeField for StateValues {
    fn code_mut(&mut self) -> Option<&mut String> {
        self.code.as_mut()
    }
}

impl Changes<State> for StateValues {
    fn apply(&self, record: &mut State) {
        if let Some(country) = self.country {
            record.country = country;
        }
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(code) = &self.code {
            record.code = code.clone();
        }
    }
}

impl Record for State {
    type Values = StateValues;
    const MODEL: &'static str = "country.subdivision";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "country" => self.country.into(),
            "name" => self.name.as_str().into(),
            "code" => self.code.as_str().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> StateValues {
        StateValues::new(self.country, self.name.clone(), self.code.clone())
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.country == 0 {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "country",
            });
        }
        required_text(Self::MODEL, "name", &self.name, NAME_SIZE)?;
        required_text(Self::MODEL, "code", &self.code, 3)
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("code")]
    }
}
