use serde::{Deserialize, Serialize};

use super::address::AddressValues;
use super::contact::{ContactMechanismValues, ContactType};
use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Party: a person or organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: Id,
    pub name: String,
    /// Unique code, drawn from the party sequence when not given.
    pub code: String,
    /// Character count of `code`, kept for ordering.
    pub code_length: usize,
    /// Language code (e.g. "fr_BE").
    pub lang: Option<String>,
    /// VAT country; enables VAT number validation.
    pub vat_country: Option<String>,
    /// VAT number without the country prefix.
    pub vat_number: Option<String>,
    pub active: bool,
}

impl Default for Party {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            code: String::new(),
            code_length: 0,
            lang: None,
            vat_country: None,
            vat_number: None,
            active: true,
        }
    }
}

impl Party {
    /// Country prefix followed by the VAT number.
    pub fn vat_code(&self) -> String {
        vat_code(self.vat_country.as_deref(), self.vat_number.as_deref())
    }

    pub fn full_name(&self) -> &str {
        &self.name
    }
}

/// Concatenate VAT country and number; missing parts count as empty.
///
/// ```
/// use stammdaten::party::vat_code;
///
/// assert_eq!(vat_code(Some("BE"), Some("0123456789")), "BE0123456789");
/// assert_eq!(vat_code(Some(""), Some("X")), "X");
/// assert_eq!(vat_code(None, None), "");
/// ```
pub fn vat_code(country: Option<&str>, number: Option<&str>) -> String {
    let mut code = country.unwrap_or_default().to_string();
    code.push_str(number.unwrap_or_default());
    code
}

/// Values for creating or writing a [`Party`].
///
/// `Option<Option<_>>` fields distinguish "leave as is" (`None`) from
/// "clear" (`Some(None)`). Addresses and contact mechanisms are created
/// for the party; `categories` replaces the linked categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyValues {
    pub name: Option<String>,
    pub code: Option<String>,
    pub code_length: Option<usize>,
    pub lang: Option<Option<String>>,
    pub vat_country: Option<Option<String>>,
    pub vat_number: Option<Option<String>>,
    pub active: Option<bool>,
    #[serde(default)]
    pub addresses: Vec<AddressValues>,
    #[serde(default)]
    pub contact_mechanisms: Vec<ContactMechanismValues>,
    pub categories: Option<Vec<Id>>,
}

impl PartyValues {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(Some(lang.into()));
        self
    }

    pub fn vat(mut self, country: impl Into<String>, number: impl Into<String>) -> Self {
        self.vat_country = Some(Some(country.into()));
        self.vat_number = Some(Some(number.into()));
        self
    }

    /// Clear VAT country and number.
    pub fn no_vat(mut self) -> Self {
        self.vat_country = Some(None);
        self.vat_number = Some(None);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn address(mut self, address: AddressValues) -> Self {
        self.addresses.push(address);
        self
    }

    pub fn contact(mut self, kind: ContactType, value: impl Into<String>) -> Self {
        self.contact_mechanisms
            .push(ContactMechanismValues::new(kind, value));
        self
    }

    pub fn category(mut self, category: Id) -> Self {
        self.categories.get_or_insert_with(Vec::new).push(category);
        self
    }

    /// VAT code of unsaved values, recomputed whenever country or number
    /// change.
    pub fn vat_code(&self) -> String {
        vat_code(
            self.vat_country.as_ref().and_then(|c| c.as_deref()),
            self.vat_number.as_ref().and_then(|n| n.as_deref()),
        )
    }
}

impl Changes<Party> for PartyValues {
    fn apply(&self, record: &mut Party) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(code) = &self.code {
            record.code = code.clone();
        }
        if let Some(len) = self.code_length {
            record.code_length = len;
        }
        if let Some(lang) = &self.lang {
            record.lang = lang.clone();
        }
        if let Some(country) = &self.vat_country {
            record.vat_country = country.clone();
        }
        if let Some(number) = &self.vat_number {
            record.vat_number = number.clone();
        }
        if let Some(active) = self.active {
            record.active = active;
        }
    }
}

impl Record for Party {
    type Values = PartyValues;
    const MODEL: &'static str = "party.party";

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
            "code_length" => Value::Int(self.code_length as i64),
            "lang" => self.lang.as_deref().into(),
            "vat_country" => self.vat_country.as_deref().into(),
            "vat_number" => self.vat_number.as_deref().into(),
            "active" => self.active.into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> PartyValues {
        PartyValues {
            name: Some(self.name.clone()),
            code: Some(self.code.clone()),
            code_length: Some(self.code_length),
            lang: Some(self.lang.clone()),
            vat_country: Some(self.vat_country.clone()),
            vat_number: Some(self.vat_number.clone()),
            active: Some(self.active),
            ..PartyValues::default()
        }
    }

    fn unique_fields() -> &'static [&'static str] {
        &["code"]
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "name",
            });
        }
        if self.code.is_empty() {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "code",
            });
        }
        let has_country = self.vat_country.as_deref().is_some_and(|c| !c.is_empty());
        let has_number = self.vat_number.as_deref().is_some_and(|n| !n.is_empty());
        if has_country && !has_number {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "vat_number",
            });
        }
        Ok(())
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("name")]
    }

    /// Codes sort by length first so that "9" comes before "10".
    fn expand_order(order: &OrderBy) -> Vec<OrderBy> {
        match order.field.as_str() {
            "code" => vec![order.on("code_length"), order.clone()],
            _ => vec![order.clone()],
        }
    }
}
