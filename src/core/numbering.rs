use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::RecordError;

/// Identifier of a sequence inside a [`SequenceGenerator`].
pub type SequenceId = u64;

/// Source of successive unique code strings.
pub trait SequenceGenerator {
    /// Consume and return the next value of sequence `id`.
    fn get_next(&mut self, id: SequenceId) -> Result<String, RecordError>;

    /// The value [`get_next`](Self::get_next) would return, without
    /// consuming it.
    fn peek_next(&self, id: SequenceId) -> Result<String, RecordError>;
}

/// A code sequence producing `{prefix}{number}{suffix}` values,
/// e.g. "C0001", "C0002", etc.
///
/// `prefix` and `suffix` may contain `${year}`, `${month}` and `${day}`,
/// replaced by the date the number is drawn on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    name: String,
    prefix: String,
    suffix: String,
    number_next: u64,
    number_increment: u64,
    padding: usize,
}

impl Sequence {
    /// Create a new sequence starting at 1, without prefix or padding.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            suffix: String::new(),
            number_next: 1,
            number_increment: 1,
            padding: 0,
        }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(name: impl Into<String>, number_next: u64) -> Self {
        Self {
            number_next,
            ..Self::new(name)
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set zero-padding width (default: 0, no padding).
    pub fn with_padding(mut self, width: usize) -> Self {
        self.padding = width;
        self
    }

    /// Step between two consecutive numbers (default: 1).
    pub fn with_increment(mut self, increment: u64) -> Self {
        self.number_increment = increment;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate the next code for the given date.
    pub fn next_on(&mut self, date: NaiveDate) -> String {
        let code = self.format(self.number_next, date);
        self.number_next += self.number_increment;
        code
    }

    /// Preview the next code without consuming it.
    pub fn peek_on(&self, date: NaiveDate) -> String {
        self.format(self.number_next, date)
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.number_next
    }

    fn format(&self, number: u64, date: NaiveDate) -> String {
        format!(
            "{}{:0>width$}{}",
            substitute(&self.prefix, date),
            number,
            substitute(&self.suffix, date),
            width = self.padding
        )
    }
}

fn substitute(affix: &str, date: NaiveDate) -> String {
    if !affix.contains("${") {
        return affix.to_string();
    }
    affix
        .replace("${year}", &format!("{:04}", date.year()))
        .replace("${month}", &format!("{:02}", date.month()))
        .replace("${day}", &format!("{:02}", date.day()))
}

/// In-memory sequence table.
#[derive(Debug, Clone, Default)]
pub struct Sequences {
    sequences: BTreeMap<SequenceId, Sequence>,
    next_id: SequenceId,
}

impl Sequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence and return its id.
    pub fn add(&mut self, sequence: Sequence) -> SequenceId {
        self.next_id += 1;
        self.sequences.insert(self.next_id, sequence);
        self.next_id
    }

    pub fn get(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(&id)
    }

    /// Draw the next value of `id` as of `date`.
    pub fn get_next_on(&mut self, id: SequenceId, date: NaiveDate) -> Result<String, RecordError> {
        self.sequences
            .get_mut(&id)
            .map(|seq| seq.next_on(date))
            .ok_or_else(|| unknown(id))
    }

    /// Preview the next value of `id` as of `date`.
    pub fn peek_next_on(&self, id: SequenceId, date: NaiveDate) -> Result<String, RecordError> {
        self.sequences
            .get(&id)
            .map(|seq| seq.peek_on(date))
            .ok_or_else(|| unknown(id))
    }
}

fn unknown(id: SequenceId) -> RecordError {
    RecordError::Sequence(format!("unknown sequence {id}"))
}

impl SequenceGenerator for Sequences {
    fn get_next(&mut self, id: SequenceId) -> Result<String, RecordError> {
        self.get_next_on(id, Utc::now().date_naive())
    }

    fn peek_next(&self, id: SequenceId) -> Result<String, RecordError> {
        self.peek_next_on(id, Utc::now().date_naive())
    }
}
