//! Create/write hooks of the party repository.

use tracing::{debug, warn};

use super::configuration::PartyConfiguration;
use super::party::{Party, PartyValues};
use crate::core::{Hook, Record, RecordError, SequenceGenerator, SequenceId};
use crate::vat::VatFormatValidator;

/// Assigns a sequence code to parties created without one and keeps
/// `code_length` in step with `code`.
///
/// The code is previewed in `before_create` and only drawn from the
/// sequence once the party is accepted, so a rejected create leaves the
/// sequence untouched.
pub struct PartyCode {
    generator: Box<dyn SequenceGenerator>,
    configuration: PartyConfiguration,
    reserved: Option<(SequenceId, String)>,
}

impl PartyCode {
    pub fn new(generator: impl SequenceGenerator + 'static, configuration: PartyConfiguration) -> Self {
        Self {
            generator: Box::new(generator),
            configuration,
            reserved: None,
        }
    }
}

/// `code_length` is never taken from the caller.
fn set_code_length(values: &mut PartyValues) {
    values.code_length = values
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| c.chars().count());
}

impl Hook<Party> for PartyCode {
    fn before_create(&mut self, values: &mut PartyValues) -> Result<(), RecordError> {
        self.reserved = None;
        if values.code.as_deref().is_none_or(str::is_empty) {
            let sequence = self.configuration.party_sequence()?;
            let code = self.generator.peek_next(sequence)?;
            values.code = Some(code.clone());
            self.reserved = Some((sequence, code));
        }
        set_code_length(values);
        Ok(())
    }

    fn before_write(&mut self, values: &mut PartyValues) -> Result<(), RecordError> {
        set_code_length(values);
        Ok(())
    }

    fn commit(&mut self, party: &Party) -> Result<(), RecordError> {
        let Some((sequence, reserved)) = self.reserved.take() else {
            return Ok(());
        };
        let code = self.generator.get_next(sequence)?;
        if code != reserved || party.code != code {
            return Err(RecordError::Sequence(format!(
                "sequence {sequence} issued '{code}' instead of '{reserved}'"
            )));
        }
        debug!(sequence, code = %code, "party code assigned");
        Ok(())
    }
}

/// Checks the VAT number against the format rule of its VAT country.
///
/// A number that fails the rule but starts with the country code is
/// stored without that prefix when the remainder passes. Without a
/// validator every number passes.
pub struct VatNumberCheck {
    validator: Option<Box<dyn VatFormatValidator>>,
}

impl VatNumberCheck {
    pub fn new(validator: impl VatFormatValidator + 'static) -> Self {
        Self {
            validator: Some(Box::new(validator)),
        }
    }

    /// Check that accepts everything, for processes without format rules.
    pub fn disabled() -> Self {
        warn!("no VAT format validator installed, VAT number validation disabled");
        Self { validator: None }
    }
}

impl Hook<Party> for VatNumberCheck {
    fn check(&self, party: &mut Party) -> Result<(), RecordError> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        let Some(country) = party.vat_country.clone().filter(|c| !c.is_empty()) else {
            return Ok(());
        };
        if !validator.countries().contains(&country) {
            return Err(RecordError::InvalidSelection {
                model: Party::MODEL,
                field: "vat_country",
                value: country,
            });
        }
        // Missing numbers are reported by the required-field check.
        let Some(number) = party.vat_number.clone().filter(|n| !n.is_empty()) else {
            return Ok(());
        };
        if validator.check_format(&country, &number) {
            return Ok(());
        }
        if let Some(stripped) = number.strip_prefix(country.as_str()) {
            if validator.check_format(&country, stripped) {
                debug!(party = party.id, country = %country, "country prefix stripped from VAT number");
                party.vat_number = Some(stripped.to_string());
                return Ok(());
            }
        }
        Err(RecordError::InvalidVat { country, number })
    }
}
