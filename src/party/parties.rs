use serde::{Deserialize, Serialize};
use tracing::debug;

use super::address::{Address, AddressKind, AddressValues};
use super::category::{Category, CategoryValues, PartyCategory, PartyCategoryValues};
use super::configuration::PartyConfiguration;
use super::contact::{ContactMechanism, ContactMechanismValues, ContactType};
use super::hooks::{PartyCode, VatNumberCheck};
use super::party::{Party, PartyValues};
use super::search::search_vat_code;
use crate::core::{
    Changes, Clause, Id, Operator, OrderBy, Record, RecordError, Repository, SequenceGenerator,
};
use crate::vat::{EuVatFormat, VatCountries, VatFormatValidator};

/// A party together with its computed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyView {
    #[serde(flatten)]
    pub party: Party,
    /// VAT country followed by VAT number.
    pub vat_code: String,
    pub full_name: String,
    pub phone: String,
    pub mobile: String,
    pub fax: String,
    pub email: String,
    pub website: String,
    /// Active addresses, in address order.
    pub addresses: Vec<Id>,
    /// Active contact mechanisms, in mechanism order.
    pub contact_mechanisms: Vec<Id>,
    pub categories: Vec<Id>,
}

/// Parties with their addresses, contact mechanisms and categories.
///
/// ```
/// use stammdaten::core::{Sequence, Sequences};
/// use stammdaten::party::*;
///
/// let mut sequences = Sequences::new();
/// let seq = sequences.add(Sequence::new("party"));
/// let mut parties = Parties::new(sequences, PartyConfiguration::new(seq));
///
/// let id = parties
///     .create(PartyValues::new("ACME").vat("BE", "0123456789").contact(ContactType::Email, "info@acme.be"))
///     .unwrap();
/// let view = parties.read(id).unwrap();
/// assert_eq!(view.party.code, "1");
/// assert_eq!(view.vat_code, "BE0123456789");
/// assert_eq!(view.email, "info@acme.be");
/// ```
pub struct Parties {
    parties: Repository<Party>,
    addresses: Repository<Address>,
    mechanisms: Repository<ContactMechanism>,
    categories: Repository<Category>,
    links: Repository<PartyCategory>,
    vat_countries: VatCountries,
}

impl Parties {
    /// Parties validating VAT numbers with the EU format rules.
    pub fn new(generator: impl SequenceGenerator + 'static, configuration: PartyConfiguration) -> Self {
        Self::with_vat_format(generator, configuration, EuVatFormat::new())
    }

    /// Parties validating VAT numbers with `validator`.
    pub fn with_vat_format(
        generator: impl SequenceGenerator + 'static,
        configuration: PartyConfiguration,
        validator: impl VatFormatValidator + 'static,
    ) -> Self {
        let countries = validator.countries().clone();
        Self::build(
            generator,
            configuration,
            VatNumberCheck::new(validator),
            countries,
        )
    }

    /// Parties without VAT number validation. `vat_code` searches never
    /// split off a country prefix.
    pub fn without_vat_format(
        generator: impl SequenceGenerator + 'static,
        configuration: PartyConfiguration,
    ) -> Self {
        Self::build(
            generator,
            configuration,
            VatNumberCheck::disabled(),
            VatCountries::empty(),
        )
    }

    fn build(
        generator: impl SequenceGenerator + 'static,
        configuration: PartyConfiguration,
        vat_check: VatNumberCheck,
        vat_countries: VatCountries,
    ) -> Self {
        Self {
            parties: Repository::new()
                .with_hook(PartyCode::new(generator, configuration))
                .with_hook(vat_check),
            addresses: Repository::new(),
            mechanisms: Repository::new(),
            categories: Repository::new(),
            links: Repository::new(),
            vat_countries,
        }
    }

    /// Supported VAT countries.
    pub fn vat_countries(&self) -> &VatCountries {
        &self.vat_countries
    }

    pub fn party(&self, id: Id) -> Result<&Party, RecordError> {
        self.parties.get(id)
    }

    /// Create a party with its addresses, contact mechanisms and categories.
    pub fn create(&mut self, mut values: PartyValues) -> Result<Id, RecordError> {
        let addresses = std::mem::take(&mut values.addresses);
        let mechanisms = std::mem::take(&mut values.contact_mechanisms);
        let categories = values.categories.take();
        self.check_children(&addresses, &mechanisms, categories.as_deref())?;

        let id = self.parties.create(values)?;
        self.create_children(id, addresses, mechanisms)?;
        if let Some(categories) = categories {
            self.set_categories(id, &categories)?;
        }
        debug!(party = id, "party created");
        Ok(id)
    }

    /// Write `values` to every party in `ids`. Addresses and contact
    /// mechanisms in `values` are added to each party; `categories`
    /// replaces their category links.
    pub fn write(&mut self, ids: &[Id], mut values: PartyValues) -> Result<(), RecordError> {
        let addresses = std::mem::take(&mut values.addresses);
        let mechanisms = std::mem::take(&mut values.contact_mechanisms);
        let categories = values.categories.take();
        self.check_children(&addresses, &mechanisms, categories.as_deref())?;

        self.parties.write(ids, values)?;
        for &id in ids {
            self.create_children(id, addresses.clone(), mechanisms.clone())?;
            if let Some(categories) = &categories {
                self.set_categories(id, categories)?;
            }
        }
        Ok(())
    }

    /// Validate child values before anything is stored, so that creating
    /// them afterwards cannot fail.
    fn check_children(
        &self,
        addresses: &[AddressValues],
        mechanisms: &[ContactMechanismValues],
        categories: Option<&[Id]>,
    ) -> Result<(), RecordError> {
        for values in addresses {
            staged::<Address>(values, |a| a.party = 1)?;
        }
        for values in mechanisms {
            staged::<ContactMechanism>(values, |m| m.party = 1)?;
        }
        for &category in categories.unwrap_or_default() {
            self.categories.get(category)?;
        }
        Ok(())
    }

    fn create_children(
        &mut self,
        party: Id,
        addresses: Vec<AddressValues>,
        mechanisms: Vec<ContactMechanismValues>,
    ) -> Result<(), RecordError> {
        for mut values in addresses {
            values.party = Some(party);
            self.addresses.create(values)?;
        }
        for mut values in mechanisms {
            values.party = Some(party);
            self.mechanisms.create(values)?;
        }
        Ok(())
    }

    fn set_categories(&mut self, party: Id, categories: &[Id]) -> Result<(), RecordError> {
        let old = self.links.search(&[Clause::eq("party", party)], &[], None);
        self.links.delete(&old)?;
        let mut seen = Vec::with_capacity(categories.len());
        for &category in categories {
            if !seen.contains(&category) {
                seen.push(category);
                self.links
                    .create(PartyCategoryValues::new(party, category))?;
            }
        }
        Ok(())
    }

    /// Duplicate parties. Each copy draws a new code; addresses, contact
    /// mechanisms and category links are re-created for the copy.
    pub fn copy(&mut self, ids: &[Id]) -> Result<Vec<Id>, RecordError> {
        self.parties.browse(ids)?;
        let mut new_ids = Vec::with_capacity(ids.len());
        for &id in ids {
            let new_id = self.parties.copy(&[id], |values| {
                values.code = None;
                values.code_length = None;
            })?[0];

            let addresses = self.addresses.search(&[Clause::eq("party", id)], &[], None);
            self.addresses.copy(&addresses, |v| v.party = Some(new_id))?;
            let mechanisms = self.mechanisms.search(&[Clause::eq("party", id)], &[], None);
            self.mechanisms.copy(&mechanisms, |v| v.party = Some(new_id))?;
            let categories = self.categories_of(id);
            self.set_categories(new_id, &categories)?;

            debug!(from = id, to = new_id, "party copied");
            new_ids.push(new_id);
        }
        Ok(new_ids)
    }

    /// Delete parties together with their addresses, contact mechanisms
    /// and category links.
    pub fn delete(&mut self, ids: &[Id]) -> Result<(), RecordError> {
        self.parties.browse(ids)?;
        let owned = [Clause::new("party", Operator::In, ids.to_vec())];
        let addresses = self.addresses.search(&owned, &[], None);
        self.addresses.delete(&addresses)?;
        let mechanisms = self.mechanisms.search(&owned, &[], None);
        self.mechanisms.delete(&mechanisms)?;
        let links = self.links.search(&owned, &[], None);
        self.links.delete(&links)?;
        self.parties.delete(ids)
    }

    /// Party with its computed fields.
    pub fn read(&self, id: Id) -> Result<PartyView, RecordError> {
        let party = self.parties.get(id)?.clone();
        let addresses = self.addresses.search(
            &[Clause::eq("party", id), Clause::eq("active", true)],
            &[],
            None,
        );
        let contact_mechanisms = self.mechanisms.search(
            &[Clause::eq("party", id), Clause::eq("active", true)],
            &[],
            None,
        );
        let mechanisms = self.mechanisms.browse(&contact_mechanisms)?;
        let first = |kind: ContactType| {
            mechanisms
                .iter()
                .find(|m| m.kind == kind)
                .map(|m| m.value.clone())
                .unwrap_or_default()
        };

        Ok(PartyView {
            vat_code: party.vat_code(),
            full_name: party.full_name().to_string(),
            phone: first(ContactType::Phone),
            mobile: first(ContactType::Mobile),
            fax: first(ContactType::Fax),
            email: first(ContactType::Email),
            website: first(ContactType::Website),
            addresses,
            contact_mechanisms,
            categories: self.categories_of(id),
            party,
        })
    }

    pub fn read_many(&self, ids: &[Id]) -> Result<Vec<PartyView>, RecordError> {
        ids.iter().map(|&id| self.read(id)).collect()
    }

    /// Search parties. Clauses on `vat_code` and `rec_name` are rewritten
    /// into clauses on stored fields.
    pub fn search(&self, domain: &[Clause], order: &[OrderBy], limit: Option<usize>) -> Vec<Id> {
        let mut rewritten = Vec::with_capacity(domain.len());
        for clause in domain {
            match clause.field.as_str() {
                "vat_code" => rewritten.extend(search_vat_code(&self.vat_countries, clause)),
                "rec_name" => rewritten.extend(self.search_rec_name(clause)),
                _ => rewritten.push(clause.clone()),
            }
        }
        self.parties.search(&rewritten, order, limit)
    }

    /// Rewrite a `rec_name` clause. When the code matches, the result is
    /// every party matching by code or by name; otherwise by name only.
    pub fn search_rec_name(&self, clause: &Clause) -> Vec<Clause> {
        let mut ids = self.parties.search(&[clause.on("code")], &[], None);
        if ids.is_empty() {
            return vec![clause.on("name")];
        }
        for id in self.parties.search(&[clause.on("name")], &[], None) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        vec![Clause::new("id", Operator::In, ids)]
    }

    /// Display pairs for `ids`. Unknown ids are skipped.
    pub fn name_get(&self, ids: &[Id]) -> Vec<(Id, String)> {
        ids.iter()
            .filter_map(|&id| self.parties.get(id).ok())
            .map(|p| (p.id, p.name.clone()))
            .collect()
    }

    /// First active address of `party` for `kind`, else its first active
    /// address. `None` when the party has no active address.
    pub fn address_get(&self, party: Id, kind: Option<AddressKind>) -> Result<Option<Id>, RecordError> {
        self.parties.get(party)?;
        let ids = self.addresses.search(
            &[Clause::eq("party", party), Clause::eq("active", true)],
            &[OrderBy::asc("sequence"), OrderBy::asc("id")],
            None,
        );
        let Some(&default) = ids.first() else {
            return Ok(None);
        };
        let Some(kind) = kind else {
            return Ok(Some(default));
        };
        for address in self.addresses.browse(&ids)? {
            if address.is_for(kind) {
                return Ok(Some(address.id));
            }
        }
        Ok(Some(default))
    }

    pub fn address(&self, id: Id) -> Result<&Address, RecordError> {
        self.addresses.get(id)
    }

    /// Create an address for an existing party.
    pub fn create_address(&mut self, values: AddressValues) -> Result<Id, RecordError> {
        if let Some(party) = values.party {
            self.parties.get(party)?;
        }
        self.addresses.create(values)
    }

    pub fn write_addresses(&mut self, ids: &[Id], values: AddressValues) -> Result<(), RecordError> {
        if let Some(party) = values.party {
            self.parties.get(party)?;
        }
        self.addresses.write(ids, values)
    }

    pub fn contact_mechanism(&self, id: Id) -> Result<&ContactMechanism, RecordError> {
        self.mechanisms.get(id)
    }

    /// Create a contact mechanism for an existing party.
    pub fn create_contact_mechanism(&mut self, values: ContactMechanismValues) -> Result<Id, RecordError> {
        if let Some(party) = values.party {
            self.parties.get(party)?;
        }
        self.mechanisms.create(values)
    }

    pub fn category(&self, id: Id) -> Result<&Category, RecordError> {
        self.categories.get(id)
    }

    pub fn create_category(&mut self, values: CategoryValues) -> Result<Id, RecordError> {
        self.categories.create(values)
    }

    /// Delete categories and their party links.
    pub fn delete_categories(&mut self, ids: &[Id]) -> Result<(), RecordError> {
        self.categories.browse(ids)?;
        let links = self
            .links
            .search(&[Clause::new("category", Operator::In, ids.to_vec())], &[], None);
        self.links.delete(&links)?;
        self.categories.delete(ids)
    }

    /// Categories linked to `party`, in link order.
    pub fn categories_of(&self, party: Id) -> Vec<Id> {
        let links = self.links.search(&[Clause::eq("party", party)], &[], None);
        self.links
            .browse(&links)
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.category)
            .collect()
    }
}

/// Build and validate a record from `values` without storing it.
fn staged<R: Record>(values: &R::Values, fill: impl FnOnce(&mut R)) -> Result<(), RecordError> {
    let mut record = R::default();
    values.apply(&mut record);
    fill(&mut record);
    record.validate()
}
