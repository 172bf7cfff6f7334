//! Remote VAT registry capability and its fault model.

use std::fmt;
use std::future::{self, Future};

use serde::{Deserialize, Serialize};

/// Fault code reported by the VIES service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ViesFault {
    /// The VAT number or country code is malformed.
    InvalidInput,
    /// The VIES service itself is down.
    ServiceUnavailable,
    /// The member state's registry is down.
    MemberStateUnavailable,
    /// The member state did not answer in time.
    Timeout,
    /// VIES is overloaded.
    ServerBusy,
    /// Any other code, kept verbatim.
    Other(String),
}

impl ViesFault {
    /// Parse a VIES error code such as `"MS_UNAVAILABLE"`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "INVALID_INPUT" => Self::InvalidInput,
            "SERVICE_UNAVAILABLE" => Self::ServiceUnavailable,
            "MS_UNAVAILABLE" => Self::MemberStateUnavailable,
            "TIMEOUT" => Self::Timeout,
            "SERVER_BUSY" => Self::ServerBusy,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::MemberStateUnavailable => "MS_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::ServerBusy => "SERVER_BUSY",
            Self::Other(code) => code,
        }
    }

    /// Faults that mean "try again later" rather than "bad number".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable | Self::MemberStateUnavailable | Self::Timeout | Self::ServerBusy
        )
    }
}

impl fmt::Display for ViesFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error from a VAT registry.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ViesError {
    /// Network or HTTP transport error.
    Network(String),
    /// The registry answered with a fault code.
    Fault(ViesFault),
    /// The registry answered with an error that carries no fault code.
    ApiError(String),
    /// Failed to parse the response.
    ParseError(String),
    /// No registry is configured.
    Unavailable,
}

impl fmt::Display for ViesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "VIES network error: {e}"),
            Self::Fault(fault) => write!(f, "VIES fault: {fault}"),
            Self::ApiError(e) => write!(f, "VIES API error: {e}"),
            Self::ParseError(e) => write!(f, "VIES parse error: {e}"),
            Self::Unavailable => f.write_str("no VAT registry configured"),
        }
    }
}

impl std::error::Error for ViesError {}

/// Capability checking a full VAT code (country prefix + number) against
/// a remote registry.
pub trait VatRegistry {
    /// Whether the registry can be used at all in this process.
    fn is_available(&self) -> bool {
        true
    }

    /// `Ok(true)` when the registry knows `vat_code` as valid.
    fn check_vat(&self, vat_code: &str) -> impl Future<Output = Result<bool, ViesError>>;
}

impl<R: VatRegistry> VatRegistry for &R {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn check_vat(&self, vat_code: &str) -> impl Future<Output = Result<bool, ViesError>> {
        (**self).check_vat(vat_code)
    }
}

/// Stand-in used when no registry client is compiled in or configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl VatRegistry for NoRegistry {
    fn is_available(&self) -> bool {
        false
    }

    fn check_vat(&self, _vat_code: &str) -> impl Future<Output = Result<bool, ViesError>> {
        future::ready(Err(ViesError::Unavailable))
    }
}
