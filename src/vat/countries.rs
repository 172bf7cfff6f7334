//! Table of country codes accepted as VAT country.

use serde::{Deserialize, Serialize};

/// Immutable list of VAT country codes (upper-case, ASCII).
///
/// The table drives both the format validator and the `vat_code` search
/// rewrite. An empty table disables prefix detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatCountries {
    codes: Vec<String>,
}

impl VatCountries {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.into().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Table without any country.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Split a known country prefix (matched case-insensitively) off
    /// `value`. Returns the table's country code and the remainder.
    pub fn split_prefix<'a>(&self, value: &'a str) -> Option<(&str, &'a str)> {
        self.codes.iter().find_map(|code| {
            let prefix = value.get(..code.len())?;
            prefix
                .eq_ignore_ascii_case(code)
                .then(|| (code.as_str(), &value[code.len()..]))
        })
    }
}
