//! Record repository, search domains, sequences and errors.
//!
//! This module provides the generic record layer the geography and party
//! modules are built on: a [`Repository`] per record type with create,
//! write, copy, delete and domain search, plus [`Hook`]s to intercept them.

mod domain;
mod error;
mod numbering;
mod store;

pub use domain::*;
pub use error::*;
pub use numbering::*;
pub use store::*;
