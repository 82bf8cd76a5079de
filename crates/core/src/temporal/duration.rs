//! Signed durations in whole seconds
//!
//! The canonical text form picks the largest unit in [`DIVIDERS`] that evenly
//! divides the value: `1209600` renders as `2w`, `90` as `90s`. The parser
//! reads the same table, so `parse(format(d)) == d` for every duration.

use super::datetime::{DatetimeValue, RdfDatetime, Resolution};
use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{numeric_table, FilterImplementation, NumericLiteral, OperatorTable};
use crate::primitives::integer::parse_strict_integer;
use crate::primitives::RdfInteger;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Unit letters and their length in seconds, largest first
pub const DIVIDERS: [(char, i64); 5] = [
    ('w', 60 * 60 * 24 * 7),
    ('d', 60 * 60 * 24),
    ('h', 60 * 60),
    ('m', 60),
    ('s', 1),
];

fn unit_seconds(letter: char) -> Option<i64> {
    let letter = letter.to_ascii_lowercase();
    DIVIDERS
        .iter()
        .find(|(unit, _)| *unit == letter)
        .map(|(_, secs)| *secs)
}

/// Parse `<integer>[w|d|h|m|s]` into seconds
///
/// A bare integer is seconds. Empty text is zero.
pub fn parse_duration_secs(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    let Some(last) = trimmed.chars().last() else {
        return Ok(0);
    };
    if last.is_ascii_digit() {
        return parse_strict_integer(trimmed)
            .map_err(|_| Error::decode(format!("could not parse duration '{}'", text)));
    }

    let multiplier = unit_seconds(last).ok_or_else(|| {
        Error::decode(format!(
            "invalid duration multiplier '{}' in '{}'",
            last, text
        ))
    })?;
    let prefix = &trimmed[..trimmed.len() - last.len_utf8()];
    if prefix.trim().is_empty() {
        return Err(Error::decode(format!("duration '{}' has no magnitude", text)));
    }
    let count = parse_strict_integer(prefix)
        .map_err(|_| Error::decode(format!("could not parse duration '{}'", text)))?;
    count
        .checked_mul(multiplier)
        .ok_or_else(|| Error::decode(format!("duration '{}' out of range", text)))
}

/// Render seconds in the canonical unit form
pub fn format_duration_secs(secs: i64) -> String {
    for (unit, divider) in DIVIDERS {
        if secs % divider == 0 {
            return format!("{}{}", secs / divider, unit);
        }
    }
    format!("{}s", secs)
}

/// A signed count of whole seconds
#[derive(Debug, Clone, Default)]
pub struct Duration {
    value: i64,
    meta: ValueMeta,
}

impl Duration {
    /// Create from seconds
    pub fn from_secs(secs: i64) -> Self {
        Self {
            value: secs,
            meta: ValueMeta::default(),
        }
    }

    /// Parse human-readable text (`"2w"`, `"90s"`, `"30"`)
    ///
    /// # Errors
    ///
    /// Returns a decode failure for an unknown unit letter or a prefix that is
    /// not a strict integer.
    pub fn from_string(text: &str) -> Result<Self> {
        parse_duration_secs(text).map(Self::from_secs)
    }

    /// Copy the count of another duration
    pub fn copy_from(other: &Duration) -> Self {
        Self::from_secs(other.value)
    }

    /// Take the count of an integer value as seconds
    pub fn from_integer(other: &RdfInteger) -> Self {
        Self::from_secs(other.value())
    }

    /// Whole seconds
    #[inline]
    pub fn seconds(&self) -> i64 {
        self.value
    }

    /// Microseconds (saturating)
    pub fn microseconds(&self) -> i64 {
        self.value.saturating_mul(1_000_000)
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self::from_secs(self.value.saturating_abs())
    }

    /// Replace the count
    pub fn set(&mut self, secs: i64) {
        self.value = secs;
        self.meta.mark_dirty();
    }

    /// Instant this duration after `base`, or after now
    ///
    /// `base` is not modified.
    pub fn expiry(&self, base: Option<&RdfDatetime>) -> RdfDatetime {
        match base {
            Some(base) => self.expiry_from(base),
            None => self.expiry_from(&RdfDatetime::now()),
        }
    }

    /// Instant this duration after `base`, at `base`'s resolution
    pub fn expiry_from<R: Resolution>(&self, base: &DatetimeValue<R>) -> DatetimeValue<R> {
        base.offset_by_secs(self.value)
    }
}

impl NumericLiteral for Duration {
    fn parse_literal(literal: &str) -> Result<i64> {
        parse_duration_secs(literal)
    }
}

impl SemanticValue for Duration {
    const TYPE_NAME: &'static str = "Duration";
    const STORAGE_TYPE: StorageType = StorageType::Integer;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.to_string().into_bytes()
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
        numeric_table::<F, Duration>()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration_secs(self.value))
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Duration {}

impl PartialEq<i64> for Duration {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd<i64> for Duration {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<i64> for Duration {
    fn from(secs: i64) -> Self {
        Self::from_secs(secs)
    }
}

impl std::str::FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Duration::from_string(&text).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl Add<i64> for &Duration {
    type Output = Duration;

    fn add(self, secs: i64) -> Duration {
        Duration::from_secs(self.value.saturating_add(secs))
    }
}

impl Add<&Duration> for &Duration {
    type Output = Duration;

    fn add(self, other: &Duration) -> Duration {
        self + other.value
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        &self + other.value
    }
}

impl Sub<i64> for &Duration {
    type Output = Duration;

    fn sub(self, secs: i64) -> Duration {
        Duration::from_secs(self.value.saturating_sub(secs))
    }
}

impl Sub<&Duration> for &Duration {
    type Output = Duration;

    fn sub(self, other: &Duration) -> Duration {
        self - other.value
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        &self - other.value
    }
}

impl Mul<i64> for &Duration {
    type Output = Duration;

    fn mul(self, factor: i64) -> Duration {
        Duration::from_secs(self.value.saturating_mul(factor))
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, factor: i64) -> Duration {
        &self * factor
    }
}

impl Neg for &Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::from_secs(self.value.saturating_neg())
    }
}

impl AddAssign<i64> for Duration {
    fn add_assign(&mut self, secs: i64) {
        let value = self.value.saturating_add(secs);
        self.set(value);
    }
}

impl AddAssign<&Duration> for Duration {
    fn add_assign(&mut self, other: &Duration) {
        *self += other.value;
    }
}

impl SubAssign<i64> for Duration {
    fn sub_assign(&mut self, secs: i64) {
        let value = self.value.saturating_sub(secs);
        self.set(value);
    }
}

impl SubAssign<&Duration> for Duration {
    fn sub_assign(&mut self, other: &Duration) {
        *self -= other.value;
    }
}
