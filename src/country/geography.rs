use tracing::debug;

use super::country::{Country, CountryValues};
use super::normalize::UppercaseCode;
use super::state::{State, StateValues};
use crate::core::{Clause, Id, Operator, OrderBy, Record, RecordError, Repository};

/// Default maximum number of results of [`Geography::name_search`].
pub const NAME_SEARCH_LIMIT: usize = 80;

/// Countries and their states.
///
/// ```
/// use stammdaten::country::*;
///
/// let mut geo = Geography::new();
/// let be = geo.create_country(CountryValues::new("Belgium", "be")).unwrap();
/// assert_eq!(geo.country(be).unwrap().code, "BE");
/// assert_eq!(geo.name_search("BE", &[], None, None), vec![(be, "Belgium".to_string())]);
/// ```
pub struct Geography {
    countries: Repository<Country>,
    states: Repository<State>,
}

impl Default for Geography {
    fn default() -> Self {
        Self::new()
    }
}

impl Geography {
    pub fn new() -> Self {
        Self {
            countries: Repository::new().with_hook(UppercaseCode::new()),
            states: Repository::new().with_hook(UppercaseCode::new()),
        }
    }

    pub fn create_country(&mut self, values: CountryValues) -> Result<Id, RecordError> {
        self.countries.create(values)
    }

    pub fn write_countries(&mut self, ids: &[Id], values: CountryValues) -> Result<(), RecordError> {
        self.countries.write(ids, values)
    }

    pub fn country(&self, id: Id) -> Result<&Country, RecordError> {
        self.countries.get(id)
    }

    pub fn search_countries(
        &self,
        domain: &[Clause],
        order: &[OrderBy],
        limit: Option<usize>,
    ) -> Vec<Id> {
        self.countries.search(domain, order, limit)
    }

    /// Delete countries. Refused while any state still belongs to one of them.
    pub fn delete_countries(&mut self, ids: &[Id]) -> Result<(), RecordError> {
        for &id in ids {
            if !self.states_of(id).is_empty() {
                return Err(RecordError::Referenced {
                    model: Country::MODEL,
                    id,
                    by: State::MODEL,
                });
            }
        }
        self.countries.delete(ids)
    }

    /// Look up countries by short code or by name.
    ///
    /// A `name` of at most two characters is first matched exactly against
    /// `code`. When that finds nothing, or the name is longer, `name` is
    /// matched with `operator` (case-insensitive substring by default).
    /// `args` is an extra domain applied to both searches.
    pub fn name_search(
        &self,
        name: &str,
        args: &[Clause],
        operator: Option<Operator>,
        limit: Option<usize>,
    ) -> Vec<(Id, String)> {
        let limit = Some(limit.unwrap_or(NAME_SEARCH_LIMIT));
        let mut ids = Vec::new();
        if name.chars().count() <= 2 {
            let mut domain = vec![Clause::eq("code", name)];
            domain.extend_from_slice(args);
            ids = self.countries.search(&domain, &[], limit);
        }
        if ids.is_empty() {
            let mut domain = vec![Clause::new("name", operator.unwrap_or(Operator::ILike), name)];
            domain.extend_from_slice(args);
            ids = self.countries.search(&domain, &[], limit);
        }
        debug!(query = name, found = ids.len(), "country name search");
        self.name_get(&ids)
    }

    /// Display pairs for `ids`. Unknown ids are skipped.
    pub fn name_get(&self, ids: &[Id]) -> Vec<(Id, String)> {
        ids.iter()
            .filter_map(|&id| self.countries.get(id).ok())
            .map(|c| (c.id, c.name.clone()))
            .collect()
    }

    /// Create a state. The owning country must exist.
    pub fn create_state(&mut self, values: StateValues) -> Result<Id, RecordError> {
        if let Some(country) = values.country {
            self.countries.get(country)?;
        }
        self.states.create(values)
    }

    pub fn write_states(&mut self, ids: &[Id], values: StateValues) -> Result<(), RecordError> {
        if let Some(country) = values.country {
            self.countries.get(country)?;
        }
        self.states.write(ids, values)
    }

    pub fn state(&self, id: Id) -> Result<&State, RecordError> {
        self.states.get(id)
    }

    pub fn search_states(&self, domain: &[Clause], order: &[OrderBy], limit: Option<usize>) -> Vec<Id> {
        self.states.search(domain, order, limit)
    }

    pub fn delete_states(&mut self, ids: &[Id]) -> Result<(), RecordError> {
        self.states.delete(ids)
    }

    /// States of `country`, in state order.
    pub fn states_of(&self, country: Id) -> Vec<Id> {
        self.states
            .search(&[Clause::eq("country", country)], &[], None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (Geography, Id, Id, Id) {
        let mut geo = Geography::new();
        let be = geo.create_country(CountryValues::new("Belgium", "BE")).unwrap();
        let de = geo.create_country(CountryValues::new("Germany", "DE")).unwrap();
        let bz = geo.create_country(CountryValues::new("Belize", "BZ")).unwrap();
        (geo, be, de, bz)
    }

    #[test]
    fn short_query_matches_code_first() {
        let (geo, _, de, _) = seeded();
        assert_eq!(geo.name_search("DE", &[], None, None), vec![(de, "Germany".into())]);
    }

    #[test]
    fn short_query_falls_back_to_name() {
        let (geo, be, _, bz) = seeded();
        let found = geo.name_search("el", &[], None, None);
        assert_eq!(found, vec![(be, "Belgium".into()), (bz, "Belize".into())]);
    }

    #[test]
    fn long_query_skips_code() {
        let (geo, _, de, _) = seeded();
        assert_eq!(geo.name_search("germ", &[], None, None), vec![(de, "Germany".into())]);
    }

    #[test]
    fn name_search_respects_limit_and_args() {
        let (geo, be, _, bz) = seeded();
        assert_eq!(geo.name_search("Bel", &[], None, Some(1)).len(), 1);
        let args = [Clause::eq("code", "BZ")];
        assert_eq!(geo.name_search("Bel", &args, None, None), vec![(bz, "Belize".into())]);
        assert!(geo.name_search("BZ", &[Clause::eq("id", be)], None, None).is_empty());
    }

    #[test]
    fn state_requires_existing_country() {
        let (mut geo, ..) = seeded();
        let err = geo.create_state(StateValues::new(42, "Nowhere", "NW")).unwrap_err();
        assert!(matches!(err, RecordError::NotFound { id: 42, .. }));
    }

    #[test]
    fn country_with_states_cannot_be_deleted() {
        let (mut geo, be, de, _) = seeded();
        let s = geo.create_state(StateValues::new(be, "Brussels", "bru")).unwrap();
        assert!(matches!(
            geo.delete_countries(&[be]),
            Err(RecordError::Referenced { .. })
        ));
        geo.delete_countries(&[de]).unwrap();
        geo.delete_states(&[s]).unwrap();
        geo.delete_countries(&[be]).unwrap();
    }
}
