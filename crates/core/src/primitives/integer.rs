//! Integer and boolean values
//!
//! ## Construction
//!
//! Construction is a closed set of named constructors:
//! - [`RdfInteger::new`]: from a number, stored directly
//! - [`RdfInteger::from_string`]: strict integer syntax, else a decode failure
//! - [`RdfInteger::copy_from`]: copy of another integer
//!
//! ## Arithmetic
//!
//! Two calling conventions are provided, and both are first-class:
//! - **value-returning** (`&v + 3`, `&v & 0xF0`, ...): returns a plain `i64`,
//!   leaving `v` untouched
//! - **mutating** (`v += 3`, `v &= 0xF0`, ...): updates `v` in place and
//!   marks it dirty
//!
//! The operators wrap on overflow (two's complement), in both conventions.
//! [`RdfInteger::checked_add`], [`RdfInteger::checked_sub`],
//! [`RdfInteger::checked_mul`] and [`RdfInteger::checked_div`] report
//! overflow as an error instead.
//!
//! Division truncates toward zero, as integer division does; it never
//! switches to floating point.

use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{
    numeric_table, parse_integer_literal, FilterImplementation, NumericLiteral, OperatorTable,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Div, Mul, Sub, SubAssign};

/// Parse strict integer syntax (surrounding whitespace allowed)
///
/// An empty string is zero.
pub(crate) fn parse_strict_integer(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|e| Error::decode(format!("invalid integer '{}': {}", text, e)))
}

/// A whole number
#[derive(Debug, Clone, Default)]
pub struct RdfInteger {
    value: i64,
    meta: ValueMeta,
}

impl RdfInteger {
    /// Create from a number
    pub fn new(value: i64) -> Self {
        Self {
            value,
            meta: ValueMeta::default(),
        }
    }

    /// Create from strict integer text
    ///
    /// # Errors
    ///
    /// Returns a decode failure if the text contains anything but an
    /// optionally signed run of digits.
    pub fn from_string(text: &str) -> Result<Self> {
        parse_strict_integer(text).map(Self::new)
    }

    /// Copy of another integer (metadata is not carried over)
    pub fn copy_from(other: &RdfInteger) -> Self {
        Self::new(other.value)
    }

    /// The number
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Replace the number in place
    pub fn set(&mut self, value: i64) {
        self.value = value;
        self.meta.mark_dirty();
    }

    /// Replace the number in place from strict integer text
    ///
    /// On failure the current value is left unchanged.
    pub fn set_from_string(&mut self, text: &str) -> Result<()> {
        let value = parse_strict_integer(text)?;
        self.set(value);
        Ok(())
    }

    /// Addition that reports overflow
    pub fn checked_add(&self, rhs: i64) -> Result<i64> {
        self.value
            .checked_add(rhs)
            .ok_or_else(|| overflow("add", self.value, rhs))
    }

    /// Subtraction that reports overflow
    pub fn checked_sub(&self, rhs: i64) -> Result<i64> {
        self.value
            .checked_sub(rhs)
            .ok_or_else(|| overflow("subtract", self.value, rhs))
    }

    /// Multiplication that reports overflow
    pub fn checked_mul(&self, rhs: i64) -> Result<i64> {
        self.value
            .checked_mul(rhs)
            .ok_or_else(|| overflow("multiply", self.value, rhs))
    }

    /// Division that reports a zero divisor (or `i64::MIN / -1`) instead of
    /// panicking
    pub fn checked_div(&self, divisor: i64) -> Result<i64> {
        self.value
            .checked_div(divisor)
            .ok_or_else(|| overflow("divide", self.value, divisor))
    }
}

fn overflow(op: &str, lhs: i64, rhs: i64) -> Error {
    Error::initialization(format!("cannot {} {} and {}: out of range", op, lhs, rhs))
}

impl NumericLiteral for RdfInteger {
    fn parse_literal(literal: &str) -> Result<i64> {
        parse_integer_literal(literal)
    }
}

impl SemanticValue for RdfInteger {
    const TYPE_NAME: &'static str = "RDFInteger";
    const STORAGE_TYPE: StorageType = StorageType::Integer;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.value.to_string().into_bytes()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::Integer(self.value)
    }

    fn meta(&self) -> &ValueMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.meta
    }

    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        numeric_table::<F, RdfInteger>()
    }
}

impl fmt::Display for RdfInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PartialEq for RdfInteger {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for RdfInteger {}

impl PartialEq<i64> for RdfInteger {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl PartialOrd for RdfInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RdfInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd<i64> for RdfInteger {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

impl Hash for RdfInteger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<i64> for RdfInteger {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<&RdfInteger> for i64 {
    fn from(value: &RdfInteger) -> Self {
        value.value
    }
}

impl From<RdfInteger> for i64 {
    fn from(value: RdfInteger) -> Self {
        value.value
    }
}

impl Serialize for RdfInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de> Deserialize<'de> for RdfInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

// ============================================================================
// Value-returning arithmetic
// ============================================================================

impl Add<i64> for &RdfInteger {
    type Output = i64;

    fn add(self, rhs: i64) -> i64 {
        self.value.wrapping_add(rhs)
    }
}

impl Sub<i64> for &RdfInteger {
    type Output = i64;

    fn sub(self, rhs: i64) -> i64 {
        self.value.wrapping_sub(rhs)
    }
}

impl Mul<i64> for &RdfInteger {
    type Output = i64;

    fn mul(self, rhs: i64) -> i64 {
        self.value.wrapping_mul(rhs)
    }
}

impl Div<i64> for &RdfInteger {
    type Output = i64;

    /// Truncating division. Panics on a zero divisor, as `i64` division
    /// does; use [`RdfInteger::checked_div`] for untrusted divisors.
    fn div(self, rhs: i64) -> i64 {
        self.value.wrapping_div(rhs)
    }
}

impl BitAnd<i64> for &RdfInteger {
    type Output = i64;

    fn bitand(self, rhs: i64) -> i64 {
        self.value & rhs
    }
}

impl BitOr<i64> for &RdfInteger {
    type Output = i64;

    fn bitor(self, rhs: i64) -> i64 {
        self.value | rhs
    }
}

// ============================================================================
// Mutating arithmetic
// ============================================================================

impl AddAssign<i64> for RdfInteger {
    fn add_assign(&mut self, rhs: i64) {
        self.value = self.value.wrapping_add(rhs);
        self.meta.mark_dirty();
    }
}

impl SubAssign<i64> for RdfInteger {
    fn sub_assign(&mut self, rhs: i64) {
        self.value = self.value.wrapping_sub(rhs);
        self.meta.mark_dirty();
    }
}

impl BitAndAssign<i64> for RdfInteger {
    fn bitand_assign(&mut self, rhs: i64) {
        self.value &= rhs;
        self.meta.mark_dirty();
    }
}

impl BitOrAssign<i64> for RdfInteger {
    fn bitor_assign(&mut self, rhs: i64) {
        self.value |= rhs;
        self.meta.mark_dirty();
    }
}

// ============================================================================
// RdfBool
// ============================================================================

/// A flag value
///
/// Identical to [`RdfInteger`] on the wire; only the storage tag differs
/// (`unsigned_integer`), which tells the store the value has flag semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RdfBool(RdfInteger);

impl RdfBool {
    /// Create from a flag
    pub fn new(value: bool) -> Self {
        Self(RdfInteger::new(value as i64))
    }

    /// Create from the integer representation
    pub fn from_integer(value: i64) -> Self {
        Self(RdfInteger::new(value))
    }

    /// Create from strict integer text
    pub fn from_string(text: &str) -> Result<Self> {
        RdfInteger::from_string(text).map(Self)
    }

    /// The flag (any non-zero integer is true)
    pub fn as_bool(&self) -> bool {
        self.0.value() != 0
    }

    /// The integer representation
    pub fn value(&self) -> i64 {
        self.0.value()
    }

    /// Replace the flag in place
    pub fn set(&mut self, value: bool) {
        self.0.set(value as i64);
    }
}

impl SemanticValue for RdfBool {
    const TYPE_NAME: &'static str = "RDFBool";
    const STORAGE_TYPE: StorageType = StorageType::UnsignedInteger;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        RdfInteger::parse_from(raw).map(Self)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.0.serialize_to_wire()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::UnsignedInteger(u64::from(self.as_bool()))
    }

    fn meta(&self) -> &ValueMeta {
        self.0.meta()
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        self.0.meta_mut()
    }

    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        numeric_table::<F, RdfInteger>()
    }
}

impl fmt::Display for RdfBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<bool> for RdfBool {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl Serialize for RdfBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.as_bool())
    }
}

impl<'de> Deserialize<'de> for RdfBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Self::new)
    }
}
