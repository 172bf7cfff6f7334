//! VAT number format validation.

use super::countries::VatCountries;

/// Capability checking a VAT number against its country's format rule.
pub trait VatFormatValidator {
    /// Countries this validator has a rule for.
    fn countries(&self) -> &VatCountries;

    /// Whether `number` (without country prefix) is well-formed for `country`.
    /// Unknown countries are never well-formed.
    fn check_format(&self, country: &str, number: &str) -> bool;
}

type VatRule = fn(&str) -> bool;

fn digits(n: &str) -> bool {
    n.chars().all(|c| c.is_ascii_digit())
}

fn alnum(n: &str) -> bool {
    n.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Per-country number rules, keyed by VIES country code.
static RULES: &[(&str, VatRule)] = &[
    ("AT", |n| n.len() == 9 && n.starts_with('U') && digits(&n[1..])),
    ("BE", |n| n.len() == 10 && digits(n)),
    ("BG", |n| (n.len() == 9 || n.len() == 10) && digits(n)),
    ("CY", |n| {
        n.len() == 9 && digits(&n[..8]) && n.as_bytes()[8].is_ascii_alphabetic()
    }),
    ("CZ", |n| (8..=10).contains(&n.len()) && digits(n)),
    ("DE", |n| n.len() == 9 && digits(n) && n.as_bytes()[0] != b'0'),
    ("DK", |n| n.len() == 8 && digits(n)),
    ("EE", |n| n.len() == 9 && digits(n)),
    ("EL", |n| n.len() == 9 && digits(n)),
    ("ES", |n| n.len() == 9 && alnum(n)),
    ("FI", |n| n.len() == 8 && digits(n)),
    ("FR", |n| n.len() == 11 && alnum(&n[..2]) && digits(&n[2..])),
    ("HR", |n| n.len() == 11 && digits(n)),
    ("HU", |n| n.len() == 8 && digits(n)),
    ("IE", |n| (n.len() == 8 || n.len() == 9) && alnum(n)),
    ("IT", |n| n.len() == 11 && digits(n)),
    ("LT", |n| (n.len() == 9 || n.len() == 12) && digits(n)),
    ("LU", |n| n.len() == 8 && digits(n)),
    ("LV", |n| n.len() == 11 && digits(n)),
    ("MT", |n| n.len() == 8 && digits(n)),
    ("NL", |n| {
        n.len() == 12 && digits(&n[..9]) && n.as_bytes()[9] == b'B' && digits(&n[10..])
    }),
    ("PL", |n| n.len() == 10 && digits(n)),
    ("PT", |n| n.len() == 9 && digits(n)),
    ("RO", |n| (2..=10).contains(&n.len()) && digits(n)),
    ("SE", |n| n.len() == 12 && digits(n)),
    ("SI", |n| n.len() == 8 && digits(n)),
    ("SK", |n| n.len() == 10 && digits(n)),
    // Northern Ireland uses the GB format
    ("XI", |n| n.len() == 9 && digits(n)),
];

fn rule(country: &str) -> Option<VatRule> {
    RULES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country))
        .map(|&(_, rule)| rule)
}

/// Rules must only slice ASCII input.
fn apply(rule: VatRule, number: &str) -> bool {
    number.is_ascii() && rule(number)
}

/// Format rules for the EU member states (plus XI) as used by VIES.
#[derive(Debug, Clone)]
pub struct EuVatFormat {
    countries: VatCountries,
}

impl Default for EuVatFormat {
    fn default() -> Self {
        Self {
            countries: VatCountries::new(RULES.iter().map(|(code, _)| *code)),
        }
    }
}

impl EuVatFormat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VatFormatValidator for EuVatFormat {
    fn countries(&self) -> &VatCountries {
        &self.countries
    }

    fn check_format(&self, country: &str, number: &str) -> bool {
        rule(country).is_some_and(|r| apply(r, number))
    }
}
