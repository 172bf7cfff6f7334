use thiserror::Error;

use super::store::Id;
use crate::vat::ViesError;

/// Errors raised by the repository layer and the hooks layered on top of it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    /// A required field is missing or empty.
    #[error("{model}: field '{field}' is required")]
    Required {
        model: &'static str,
        field: &'static str,
    },

    /// A text field exceeds its declared size.
    #[error("{model}: field '{field}' is limited to {size} characters")]
    TooLong {
        model: &'static str,
        field: &'static str,
        size: usize,
    },

    /// A unique constraint would be violated.
    #[error("{model}: {field} '{value}' must be unique")]
    Unique {
        model: &'static str,
        field: &'static str,
        value: String,
    },

    /// A selection field holds a value outside its allowed set.
    #[error("{model}: '{value}' is not a valid value for field '{field}'")]
    InvalidSelection {
        model: &'static str,
        field: &'static str,
        value: String,
    },

    /// No record with the given id.
    #[error("{model}: record {id} does not exist")]
    NotFound { model: &'static str, id: Id },

    /// The record is still referenced by other records and cannot be deleted.
    #[error("{model}: record {id} is still referenced by {by}")]
    Referenced {
        model: &'static str,
        id: Id,
        by: &'static str,
    },

    /// Sequence lookup or configuration error.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// VAT number failed the country format check.
    #[error("invalid VAT number '{number}' for country {country}")]
    InvalidVat { country: String, number: String },

    /// The VIES service (or a member state behind it) is temporarily down.
    #[error("the VIES service is unavailable, try again later")]
    ViesUnavailable,

    /// Any other registry failure, passed through unchanged.
    #[error(transparent)]
    Vies(#[from] ViesError),
}
