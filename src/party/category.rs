use serde::{Deserialize, Serialize};

use crate::core::{Changes, Id, OrderBy, Record, RecordError, Value};

/// Free-form party classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub active: bool,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValues {
    pub name: Option<String>,
    pub active: Option<bool>,
}

impl CategoryValues {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            active: None,
        }
    }
}

impl Changes<Category> for CategoryValues {
    fn apply(&self, record: &mut Category) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(active) = self.active {
            record.active = active;
        }
    }
}

impl Record for Category {
    type Values = CategoryValues;
    const MODEL: &'static str = "party.category";

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
            "active" => self.active.into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> CategoryValues {
        CategoryValues {
            name: Some(self.name.clone()),
            active: Some(self.active),
        }
    }

    fn unique_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "name",
            });
        }
        Ok(())
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("name")]
    }
}

/// Link between a party and a category. Removed with either side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCategory {
    pub id: Id,
    pub party: Id,
    pub category: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCategoryValues {
    pub party: Option<Id>,
    pub category: Option<Id>,
}

impl PartyCategoryValues {
    pub fn new(party: Id, category: Id) -> Self {
        Self {
            party: Some(party),
            category: Some(category),
        }
    }
}

impl Changes<PartyCategory> for PartyCategoryValues {
    fn apply(&self, record: &mut PartyCategory) {
        if let Some(party) = self.party {
            record.party = party;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
    }
}

impl Record for PartyCategory {
    type Values = PartyCategoryValues;
    const MODEL: &'static str = "party.party-party.category";

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
            "category" => self.category.into(),
            _ => Value::Null,
        }
    }

    fn values(&self) -> PartyCategoryValues {
        PartyCategoryValues::new(self.party, self.category)
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.party == 0 {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "party",
            });
        }
        if self.category == 0 {
            return Err(RecordError::Required {
                model: Self::MODEL,
                field: "category",
            });
        }
        Ok(())
    }
}
