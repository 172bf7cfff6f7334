//! Parties, their addresses, contact mechanisms and categories.
//!
//! [`Parties`] wires the party repository hooks: code generation from the
//! configured sequence, VAT number format checks, and the computed fields
//! (`vat_code`, `full_name`, first phone/mobile/fax/email/website).
//! [`CheckVies`] validates VAT codes against a remote registry.

mod address;
mod category;
mod check_vies;
mod configuration;
mod contact;
mod hooks;
mod parties;
#[allow(clippy::module_inception)]
mod party;
mod search;

pub use address::{Address, AddressKind, AddressValues};
pub use category::{Category, CategoryValues, PartyCategory, PartyCategoryValues};
pub use check_vies::{CheckVies, CheckViesOutcome, CheckViesResult, CheckViesState};
pub use configuration::PartyConfiguration;
pub use contact::{ContactMechanism, ContactMechanismValues, ContactType};
pub use hooks::{PartyCode, VatNumberCheck};
pub use parties::{Parties, PartyView};
pub use party::{Party, PartyValues, vat_code};
pub use search::search_vat_code;
