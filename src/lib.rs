//! # stammdaten
//!
//! Party and country master data for back-office systems: countries and
//! their states, parties with addresses, contact mechanisms and categories,
//! sequence-generated party codes, VAT number format checks and the EU
//! VIES registry check.
//!
//! Records live in an in-memory [`core::Repository`] per record type.
//! Behavior is layered on through [`core::Hook`]s: codes are upper-cased,
//! party codes are drawn from a sequence, VAT numbers are checked before a
//! party is saved.
//!
//! ## Quick Start
//!
//! ```rust
//! use stammdaten::core::{Clause, Sequence, Sequences};
//! use stammdaten::country::{CountryValues, Geography};
//! use stammdaten::party::*;
//!
//! let mut geo = Geography::new();
//! let be = geo.create_country(CountryValues::new("Belgium", "be")).unwrap();
//! assert_eq!(geo.country(be).unwrap().code, "BE");
//!
//! let mut sequences = Sequences::new();
//! let seq = sequences.add(Sequence::new("party").with_prefix("C").with_padding(4));
//! let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));
//!
//! let acme = parties
//!     .create(
//!         PartyValues::new("ACME SA")
//!             .vat("BE", "BE0123456789")
//!             .address(AddressValues::new().city("1000", "Bruxelles").country(be)),
//!     )
//!     .unwrap();
//!
//! let view = parties.read(acme).unwrap();
//! assert_eq!(view.party.code, "C0001");
//! assert_eq!(view.vat_code, "BE0123456789");
//! assert_eq!(parties.search(&[Clause::ilike("vat_code", "be0123")], &[], None), vec![acme]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Repository, countries, parties, VAT format rules, VIES workflow |
//! | `vat` | reqwest-based client for the EU VIES REST API |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod country;

#[cfg(feature = "core")]
pub mod party;

#[cfg(feature = "core")]
pub mod vat;
