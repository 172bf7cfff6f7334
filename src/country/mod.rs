//! Countries and country subdivisions.
//!
//! Codes are normalized to upper case on every create and write. Country
//! names and codes are unique; state codes are not.

#[allow(clippy::module_inception)]
mod country;
mod geography;
mod normalize;
mod state;

pub use country::{Country, CountryValues, NAME_SIZE};
pub use geography::{Geography, NAME_SEARCH_LIMIT};
pub use normalize::{CodeField, UppercaseCode};
pub use state::{State, StateValues};
