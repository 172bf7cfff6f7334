//! In-memory record repository with create/write hooks.
//!
//! A [`Repository`] owns the rows of one record type. Every create and
//! write runs the installed [`Hook`]s, then the record's own
//! [`Record::validate`], then the unique constraints. A call that fails
//! leaves the repository unchanged.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::trace;

use super::domain::{Clause, Direction, OrderBy, Value};
use super::error::RecordError;

/// Record identifier, unique within one repository.
pub type Id = u64;

/// A record type stored in a [`Repository`].
pub trait Record: Clone + Default {
    /// Partial values for create and write. Fields left unset are untouched.
    type Values: Changes<Self> + Clone + Default;

    /// Model name used in error messages.
    const MODEL: &'static str;

    fn id(&self) -> Id;

    fn set_id(&mut self, id: Id);

    /// Field value for domain evaluation and ordering. Unknown fields are
    /// [`Value::Null`].
    fn field(&self, name: &str) -> Value;

    /// The stored values of this record, as a create payload.
    fn values(&self) -> Self::Values;

    /// Fields whose values must be unique across the repository.
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Required-field and size checks.
    fn validate(&self) -> Result<(), RecordError> {
        Ok(())
    }

    fn default_order() -> Vec<OrderBy> {
        vec![OrderBy::asc("id")]
    }

    /// Expand an order term on a field into the terms actually sorted on.
    fn expand_order(order: &OrderBy) -> Vec<OrderBy> {
        vec![order.clone()]
    }
}

/// Applies a partial value set to a record.
pub trait Changes<R> {
    fn apply(&self, record: &mut R);
}

/// Interception points around create and write.
pub trait Hook<R: Record> {
    /// Adjust the payload of a create before the record is built.
    fn before_create(&mut self, values: &mut R::Values) -> Result<(), RecordError> {
        let _ = values;
        Ok(())
    }

    /// Adjust the payload of a write before it is applied.
    fn before_write(&mut self, values: &mut R::Values) -> Result<(), RecordError> {
        let _ = values;
        Ok(())
    }

    /// Constraint on the resulting record. May repair the record in place.
    fn check(&self, record: &mut R) -> Result<(), RecordError> {
        let _ = record;
        Ok(())
    }

    /// Runs once a created record passed every check, right before it is
    /// stored. Resources reserved in `before_create` are consumed here.
    fn commit(&mut self, record: &R) -> Result<(), RecordError> {
        let _ = record;
        Ok(())
    }
}

/// Rows of one record type, keyed by id.
pub struct Repository<R: Record> {
    rows: BTreeMap<Id, R>,
    next_id: Id,
    hooks: Vec<Box<dyn Hook<R>>>,
}

impl<R: Record> Default for Repository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Repository<R> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            hooks: Vec::new(),
        }
    }

    /// Install a hook. Hooks run in installation order.
    pub fn with_hook(mut self, hook: impl Hook<R> + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn exists(&self, id: Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn get(&self, id: Id) -> Result<&R, RecordError> {
        self.rows
            .get(&id)
            .ok_or(RecordError::NotFound { model: R::MODEL, id })
    }

    /// Records for `ids`, in the order given.
    pub fn browse(&self, ids: &[Id]) -> Result<Vec<R>, RecordError> {
        ids.iter().map(|&id| self.get(id).cloned()).collect()
    }

    /// Ids of the records matching every clause of `domain`, sorted by
    /// `order` (or the default order when empty) and truncated to `limit`.
    pub fn search(&self, domain: &[Clause], order: &[OrderBy], limit: Option<usize>) -> Vec<Id> {
        let mut found: Vec<&R> = self
            .rows
            .values()
            .filter(|r| matches(*r, domain))
            .collect();

        let order = if order.is_empty() {
            R::default_order()
        } else {
            order.to_vec()
        };
        let mut terms: Vec<OrderBy> = order.iter().flat_map(R::expand_order).collect();
        terms.push(OrderBy::asc("id"));
        found.sort_by(|a, b| compare(*a, *b, &terms));

        let ids = found.into_iter().map(Record::id);
        match limit {
            Some(n) => ids.take(n).collect(),
            None => ids.collect(),
        }
    }

    /// Create a record from `values`. Returns the new id.
    pub fn create(&mut self, mut values: R::Values) -> Result<Id, RecordError> {
        for hook in &mut self.hooks {
            hook.before_create(&mut values)?;
        }
        let mut record = R::default();
        values.apply(&mut record);
        let id = self.next_id;
        record.set_id(id);
        self.check(&mut record)?;
        self.ensure_unique(&record)?;
        for hook in &mut self.hooks {
            hook.commit(&record)?;
        }

        trace!(model = R::MODEL, id, "record created");
        self.rows.insert(id, record);
        self.next_id += 1;
        Ok(id)
    }

    /// Apply `values` to every record in `ids`. All or nothing.
    pub fn write(&mut self, ids: &[Id], mut values: R::Values) -> Result<(), RecordError> {
        for hook in &mut self.hooks {
            hook.before_write(&mut values)?;
        }
        let mut staged = Vec::with_capacity(ids.len());
        for &id in ids {
            let mut record = self.get(id)?.clone();
            values.apply(&mut record);
            self.check(&mut record)?;
            staged.push(record);
        }
        for record in &staged {
            self.ensure_unique_among(record, &staged)?;
        }
        for record in staged {
            trace!(model = R::MODEL, id = record.id(), "record written");
            self.rows.insert(record.id(), record);
        }
        Ok(())
    }

    /// Duplicate the records in `ids`. `default` adjusts the values of each
    /// copy before it is created through the normal create path.
    pub fn copy(
        &mut self,
        ids: &[Id],
        default: impl Fn(&mut R::Values),
    ) -> Result<Vec<Id>, RecordError> {
        let sources = self.browse(ids)?;
        let mut new_ids = Vec::with_capacity(sources.len());
        for source in &sources {
            let mut values = source.values();
            default(&mut values);
            new_ids.push(self.create(values)?);
        }
        Ok(new_ids)
    }

    /// Remove the records in `ids`. Unknown ids are an error and nothing
    /// is removed.
    pub fn delete(&mut self, ids: &[Id]) -> Result<(), RecordError> {
        for &id in ids {
            self.get(id)?;
        }
        for id in ids {
            self.rows.remove(id);
        }
        Ok(())
    }

    fn check(&self, record: &mut R) -> Result<(), RecordError> {
        for hook in &self.hooks {
            hook.check(record)?;
        }
        record.validate()
    }

    fn ensure_unique(&self, record: &R) -> Result<(), RecordError> {
        self.ensure_unique_among(record, &[])
    }

    /// Unique check of `record` against the stored rows not being replaced
    /// by `staged`, and against the other `staged` rows.
    fn ensure_unique_among(&self, record: &R, staged: &[R]) -> Result<(), RecordError> {
        for &field in R::unique_fields() {
            let value = record.field(field);
            if value == Value::Null {
                continue;
            }
            let replaced = |id: Id| staged.iter().any(|s| s.id() == id);
            let clash = self
                .rows
                .values()
                .filter(|other| !replaced(other.id()))
                .chain(staged.iter())
                .any(|other| other.id() != record.id() && other.field(field) == value);
            if clash {
                return Err(RecordError::Unique {
                    model: R::MODEL,
                    field,
                    value: match value {
                        Value::Text(s) => s,
                        other => other.to_string(),
                    },
                });
            }
        }
        Ok(())
    }
}

fn matches<R: Record>(record: &R, domain: &[Clause]) -> bool {
    domain
        .iter()
        .all(|c| c.operator.matches(&record.field(&c.field), &c.value))
}

fn compare<R: Record>(a: &R, b: &R, terms: &[OrderBy]) -> Ordering {
    for term in terms {
        let o = a.field(&term.field).order(&b.field(&term.field));
        let o = match term.direction {
            Direction::Asc => o,
            Direction::Desc => o.reverse(),
        };
        if o != Ordering::Equal {
            return o;
        }
    }
    Ordering::Equal
}
