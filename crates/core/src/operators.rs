//! Query operator tables
//!
//! Each value type exposes a dispatch table from operator tokens (`=`, `<`,
//! `contains`, ...) to predicate builders. The filter engine owns predicate
//! execution; this layer only tells it which predicate a token maps to and
//! how the literal argument is interpreted for the attribute's type.
//!
//! ## Usage
//!
//! ```ignore
//! let table = RdfInteger::operators::<MyFilter>();
//! let predicate = table.build("<", "size", &filter, "100")?;
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Predicate constructors provided by the filter engine
///
/// Numeric predicates receive the literal already converted to the
/// attribute's storage units.
pub trait FilterImplementation {
    /// Executable predicate produced by the engine
    type Predicate;

    /// Attribute matches the regular expression
    fn predicate_contains(&self, attribute: &str, regex: &str) -> Self::Predicate;

    /// Attribute is strictly less than `value`
    fn predicate_less_than(&self, attribute: &str, value: i64) -> Self::Predicate;

    /// Attribute is strictly greater than `value`
    fn predicate_greater_than(&self, attribute: &str, value: i64) -> Self::Predicate;

    /// Attribute equals `value` numerically
    fn predicate_numeric_equal(&self, attribute: &str, value: i64) -> Self::Predicate;

    /// Attribute is less than or equal to `value`
    fn predicate_lesser_equal(&self, attribute: &str, value: i64) -> Self::Predicate;

    /// Attribute is greater than or equal to `value`
    fn predicate_greater_equal(&self, attribute: &str, value: i64) -> Self::Predicate;

    /// Object subject matches the regular expression
    fn subject_contains(&self, regex: &str) -> Self::Predicate;

    /// Object carries the named attribute
    fn has_predicate(&self, attribute: &str) -> Self::Predicate;
}

/// Builds a predicate from `(attribute, filter, literal)`
pub type PredicateBuilder<F> =
    fn(&str, &F, &str) -> Result<<F as FilterImplementation>::Predicate>;

/// One entry of an operator table
pub struct Operator<F: FilterImplementation> {
    /// Number of literal arguments the operator takes
    pub arity: usize,
    /// Predicate builder
    pub build: PredicateBuilder<F>,
}

impl<F: FilterImplementation> Clone for Operator<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: FilterImplementation> Copy for Operator<F> {}

impl<F: FilterImplementation> fmt::Debug for Operator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("arity", &self.arity)
            .finish()
    }
}

/// Token → operator dispatch table
pub struct OperatorTable<F: FilterImplementation> {
    entries: BTreeMap<&'static str, Operator<F>>,
}

impl<F: FilterImplementation> OperatorTable<F> {
    /// Empty table
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Table every value type starts from: `contains`
    pub fn base() -> Self {
        Self::new().with("contains", 1, contains_match::<F>)
    }

    /// Add or replace an entry
    pub fn with(mut self, token: &'static str, arity: usize, build: PredicateBuilder<F>) -> Self {
        self.entries.insert(token, Operator { arity, build });
        self
    }

    /// Look up an operator
    pub fn get(&self, token: &str) -> Option<&Operator<F>> {
        self.entries.get(token)
    }

    /// True if the token is supported
    pub fn supports(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Supported tokens in sorted order
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the predicate for `token`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unsupported token, or the builder's
    /// error if the literal cannot be interpreted.
    pub fn build(
        &self,
        token: &str,
        attribute: &str,
        filter: &F,
        literal: &str,
    ) -> Result<F::Predicate> {
        let op = self
            .get(token)
            .ok_or_else(|| Error::NotFound(format!("operator '{}'", token)))?;
        (op.build)(attribute, filter, literal)
    }
}

impl<F: FilterImplementation> Default for OperatorTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FilterImplementation> fmt::Debug for OperatorTable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.arity)))
            .finish()
    }
}

// ============================================================================
// Shared builders
// ============================================================================

/// Literal is a regular expression matched against the attribute
pub fn contains_match<F: FilterImplementation>(
    attribute: &str,
    filter: &F,
    regex: &str,
) -> Result<F::Predicate> {
    Ok(filter.predicate_contains(attribute, regex))
}

/// Literal is a plain prefix, escaped and anchored
pub fn starts_with<F: FilterImplementation>(
    attribute: &str,
    filter: &F,
    prefix: &str,
) -> Result<F::Predicate> {
    let regex = format!("^{}", regex::escape(prefix));
    Ok(filter.predicate_contains(attribute, &regex))
}

/// Types whose operator literals convert to an integer in storage units
pub trait NumericLiteral {
    /// Convert an operator literal
    fn parse_literal(literal: &str) -> Result<i64>;
}

/// Strict integer literal
pub fn parse_integer_literal(literal: &str) -> Result<i64> {
    literal
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::decode(format!("invalid integer literal '{}': {}", literal, e)))
}

/// `<` for numeric types
pub fn numeric_less_than<F: FilterImplementation, V: NumericLiteral>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    Ok(filter.predicate_less_than(attribute, V::parse_literal(literal)?))
}

/// `>` for numeric types
pub fn numeric_greater_than<F: FilterImplementation, V: NumericLiteral>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    Ok(filter.predicate_greater_than(attribute, V::parse_literal(literal)?))
}

/// `=` for numeric types
pub fn numeric_equal<F: FilterImplementation, V: NumericLiteral>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    Ok(filter.predicate_numeric_equal(attribute, V::parse_literal(literal)?))
}

/// Operator table shared by the integer family
pub fn numeric_table<F: FilterImplementation, V: NumericLiteral>() -> OperatorTable<F> {
    OperatorTable::new()
        .with("<", 1, numeric_less_than::<F, V>)
        .with(">", 1, numeric_greater_than::<F, V>)
        .with("=", 1, numeric_equal::<F, V>)
}
