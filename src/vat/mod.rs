//! VAT number validation: country format rules and the VIES registry.
//!
//! Both checks are capabilities injected into the party layer. Format
//! rules ([`EuVatFormat`]) are always compiled in; the VIES client
//! ([`ViesClient`]) needs the `vat` feature. Without it the default
//! registry is [`NoRegistry`], which reports itself unavailable.
//!
//! # Example
//!
//! ```ignore
//! use stammdaten::vat::*;
//!
//! // Format-only validation (no network)
//! assert!(EuVatFormat::new().check_format("BE", "0123456789"));
//!
//! // VIES API check (async, requires network)
//! let client = ViesClient::new(ViesConfig::default())?;
//! let result = client.check("BE", "0123456789").await?;
//! ```

mod countries;
mod format;
mod registry;
#[cfg(feature = "vat")]
mod vies;

pub use countries::VatCountries;
pub use format::{EuVatFormat, VatFormatValidator};
pub use registry::{NoRegistry, VatRegistry, ViesError, ViesFault};
#[cfg(feature = "vat")]
pub use vies::{VIES_URL, ViesClient, ViesConfig, ViesResult};

