use serde::{Deserialize, Serialize};

use super::normalize::CodeField;
use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Maximum length of a country or state name.
pub const NAME_SIZE: usize = 64;

/// Country with its ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: Id,
    /// Full name of the country.
    pub name: String,
    /// Two-letter ISO code, stored upper-case.
    pub code: String,
}

/// Partial values for creating or writing a [`Country`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryValues {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl CountryValues {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
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

impl CodeField for CountryValues {
    fn code_mut(&mut self) -> Option<&mut String> {
        self.code.as_mut()
    }
}

impl Changes<Country> for CountryValues {
    fn apply(&self, record: &mut Country) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(code) = &self.code {
            record.code = code.clone();
        }
    }
}

impl Record for Country {
    type Values = CountryValues;
    const MODEL: &'static str = "country.country";

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "code" => self.code.as_str().into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> CountryValues {
        CountryValues::new(self.name.clone(), self.code.clone())
    }

    fn unique_fields() -> &'static [&'static str] {
        &["name", "code"]
    }

    fn validate(&self) -> Result<(), RecordError> {
        required_text(Self::MODEL, "name", &self.name, NAME_SIZE)?;
        required_text(Self::MODEL, "code", &self.code, 2)
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("code")]
    }
}

/// Non-empty text of at most `size` characters.
pub(crate) fn required_text(
    model: &'static str,
    field: &'static str,
    value: &str,
    size: usize,
) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::Required { model, field });
    }
    if value.chars().count() > size {
        return Err(RecordError::TooLong { model, field, size });
    }
    Ok(())
}
