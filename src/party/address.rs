use serde::{Deserialize, Serialize};

use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Postal address of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Id,
    pub party: Id,
    pub name: Option<String>,
    pub street: Option<String>,
    pub streetbis: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<Id>,
    pub subdivision: Option<Id>,
    /// Explicit position among the party's addresses. Unset sorts last.
    pub sequence: Option<i64>,
    pub active: bool,
    /// Use for invoices.
    pub invoice: bool,
    /// Use for deliveries.
    pub delivery: bool,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            id: 0,
            party: 0,
            name: None,
            street: None,
            streetbis: None,
            zip: None,
            city: None,
            country: None,
            subdivision: None,
            sequence: None,
            active: true,
            invoice: false,
            delivery: false,
        }
    }
}

/// Purpose an address can be flagged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Invoice,
    Delivery,
}

impl AddressKind {
    /// Name of the flag field on [`Address`].
    pub fn field(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Delivery => "delivery",
        }
    }
}

impl Address {
    pub fn is_for(&self, kind: AddressKind) -> bool {
        match kind {
            AddressKind::Invoice => self.invoice,
            AddressKind::Delivery => self.delivery,
        }
    }
}

/// Values for creating or writing an [`Address`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressValues {
    pub party: Option<Id>,
    pub name: Option<Option<String>>,
    pub street: Option<Option<String>>,
    pub streetbis: Option<Option<String>>,
    pub zip: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub country: Option<Option<Id>>,
    pub subdivision: Option<Option<Id>>,
    pub sequence: Option<Option<i64>>,
    pub active: Option<bool>,
    pub invoice: Option<bool>,
    pub delivery: Option<bool>,
}

impl AddressValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(Some(street.into()));
        self
    }

    pub fn city(mut self, zip: impl Into<String>, city: impl Into<String>) -> Self {
        self.zip = Some(Some(zip.into()));
        self.city = Some(Some(city.into()));
        self
    }

    pub fn country(mut self, country: Id) -> Self {
        self.country = Some(Some(country));
        self
    }

    pub fn sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(Some(sequence));
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Flag the address for `kind`.
    pub fn for_kind(mut self, kind: AddressKind) -> Self {
        match kind {
            AddressKind::Invoice => self.invoice = Some(true),
            AddressKind::Delivery => self.delivery = Some(true),
        }
        self
    }
}

impl Changes<Address> for AddressValues {
    fn apply(&self, record: &mut Address) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        set(&mut record.party, &self.party);
        set(&mut record.name, &self.name);
        set(&mut record.street, &self.street);
        set(&mut record.streetbis, &self.streetbis);
        set(&mut record.zip, &self.zip);
        set(&mut record.city, &self.city);
        set(&mut record.country, &self.country);
        set(&mut record.subdivision, &self.subdivision);
        set(&mut record.sequence, &self.sequence);
        set(&mut record.active, &self.active);
        set(&mut record.invoice, &self.invoice);
        set(&mut record.delivery, &self.delivery);
    }
}

impl Record for Address {
    type Values = AddressValues;
    const MODEL: &'static str = "party.address";

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
            "name" => self.name.as_deref().into(),
            "street" => self.street.as_deref().into(),
            "streetbis" => self.streetbis.as_deref().into(),
            "zip" => self.zip.as_deref().into(),
            "city" => self.city.as_deref().into(),
            "country" => self.country.into(),
            "subdivision" => self.subdivision.into(),
            "sequence" => self.sequence.into(),
            "active" => self.active.into(),
            "invoice" => self.invoice.into(),
            "delivery" => self.delivery.into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> AddressValues {
        AddressValues {
            party: Some(self.party),
            name: Some(self.name.clone()),
            street: Some(self.street.clone()),
            streetbis: Some(self.streetbis.clone()),
            zip: Some(self.zip.clone()),
            city: Some(self.city.clone()),
            country: Some(self.country),
            subdivision: Some(self.subdivision),
            sequence: Some(self.sequence),
            active: Some(self.active),
            invoice: Some(self.invoice),
            delivery: Some(self.delivery),
        }
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.party == 0 {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "party",
            });
        }
        Ok(())
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("sequence"), OrderBy::asc("id")]
    }
}
