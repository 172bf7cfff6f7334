//! Domain rewrites for the party's computed fields.

use crate::core::{Clause, Value};
use crate::vat::VatCountries;

/// Rewrite a clause on `vat_code` into clauses on the stored fields.
///
/// A text value starting with a known VAT country (any case) becomes an
/// exact match on `vat_country` plus the original operator on the rest of
/// the value against `vat_number`. Anything else is matched against
/// `vat_number` alone.
///
/// ```
/// use stammdaten::core::{Clause, Operator};
/// use stammdaten::party::search_vat_code;
/// use stammdaten::vat::VatCountries;
///
/// let table = VatCountries::new(["BE", "DE"]);
/// let clauses = search_vat_code(&table, &Clause::ilike("vat_code", "BE0123456789"));
/// assert_eq!(
///     clauses,
///     vec![
///         Clause::eq("vat_country", "BE"),
///         Clause::new("vat_number", Operator::ILike, "0123456789"),
///     ]
/// );
/// ```
pub fn search_vat_code(countries: &VatCountries, clause: &Clause) -> Vec<Clause> {
    if let Value::Text(text) = &clause.value {
        if let Some((country, rest)) = countries.split_prefix(text) {
            return vec![
                Clause::eq("vat_country", country),
                Clause::new("vat_number", clause.operator, rest),
            ];
        }
    }
    vec![clause.on("vat_number")]
}
