//! Search domains: field clauses, values and ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::store::Id;

/// A field value as seen by domain evaluation and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as used by purpose flags and `active`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Text(s) => !s.is_empty(),
            Self::List(l) => !l.is_empty(),
        }
    }

    /// Ordering used by `order by`. Nulls sort after every other value.
    pub fn order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Greater,
            (_, Self::Null) => Ordering::Less,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let o = x.order(y);
                    if o != Ordering::Equal {
                        return o;
                    }
                }
                a.len().cmp(&b.len())
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Text(_) => 2,
            Self::List(_) => 3,
            Self::Null => 4,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Id> for Value {
    fn from(id: Id) -> Self {
        Self::Int(id as i64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Id>> for Value {
    fn from(ids: Vec<Id>) -> Self {
        Self::List(ids.into_iter().map(Value::from).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::List(l) => {
                f.write_str("(")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Comparison operator of a domain clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// Case-sensitive substring match.
    Like,
    /// Case-insensitive substring match.
    ILike,
    /// Membership in a list value.
    In,
    /// Non-membership in a list value.
    NotIn,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Like => "like",
            Self::ILike => "ilike",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    /// Apply the operator to a stored value and a clause operand.
    pub fn matches(&self, stored: &Value, operand: &Value) -> bool {
        match self {
            Self::Eq => stored == operand,
            Self::Ne => stored != operand,
            Self::Like => match (stored, operand) {
                (Value::Text(s), Value::Text(p)) => s.contains(p.as_str()),
                _ => false,
            },
            Self::ILike => match (stored, operand) {
                (Value::Text(s), Value::Text(p)) => {
                    s.to_lowercase().contains(&p.to_lowercase())
                }
                _ => false,
            },
            Self::In => match operand {
                Value::List(l) => l.contains(stored),
                _ => false,
            },
            Self::NotIn => match operand {
                Value::List(l) => !l.contains(stored),
                _ => true,
            },
        }
    }
}

/// A single `(field, operator, value)` condition. A domain is a slice of
/// clauses joined by AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
}

impl Clause {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn ilike(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::ILike, value)
    }

    /// Same operator and value, different field.
    pub fn on(&self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: self.operator,
            value: self.value.clone(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.as_str(), self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

/// One `order by` term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Same direction, different field.
    pub fn on(&self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: self.direction,
        }
    }
}
