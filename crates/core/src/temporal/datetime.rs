//! Absolute time values
//!
//! A datetime is an integer count of `resolution` units since the Unix
//! epoch (1970-01-01 00:00:00 UTC). The resolution is a type parameter:
//!
//! - [`RdfDatetime`]: microseconds (the default everywhere)
//! - [`RdfDatetimeSeconds`]: whole seconds
//!
//! ## Construction
//!
//! - [`DatetimeValue::copy_from`]: another datetime of the same resolution
//! - [`DatetimeValue::from_raw`]: a number, stored as the internal count
//! - [`DatetimeValue::from_chrono`] / [`DatetimeValue::from_naive`]: a UTC
//!   calendar date/time, sub-second part kept in resolution units
//! - [`DatetimeValue::from_string`]: strict integer first, otherwise
//!   human-readable text (see [`crate::temporal::human`])
//!
//! ## Arithmetic
//!
//! - `+`/`-` with an `i64` or a [`Duration`] is in **seconds** and yields a
//!   new datetime at the same resolution
//! - datetime `-` datetime yields a [`Duration`] in whole seconds, truncating
//!   any sub-second remainder
//! - `*` with a `u64` rescales the **raw internal count**. It converts between
//!   resolutions (`secs_value * 1_000_000` reinterpreted as micros); it is not
//!   a calendar operation and multiplying a meaningful instant by anything
//!   other than a unit ratio produces a meaningless instant.
//!
//! Counts are unsigned: instants before the epoch cannot be represented and
//! arithmetic saturates at the epoch.

use super::duration::Duration;
use super::human::{self, DateAnchor};
use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{FilterImplementation, OperatorTable};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::time::{SystemTime, UNIX_EPOCH};

/// Display format for datetimes
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit of a datetime's internal count
pub trait Resolution:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Units per second
    const UNITS_PER_SECOND: u64;

    /// Name the datetime type registers under
    const TYPE_NAME: &'static str;
}

/// Microsecond resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Microseconds;

impl Resolution for Microseconds {
    const UNITS_PER_SECOND: u64 = 1_000_000;
    const TYPE_NAME: &'static str = "RDFDatetime";
}

/// Whole-second resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Seconds;

impl Resolution for Seconds {
    const UNITS_PER_SECOND: u64 = 1;
    const TYPE_NAME: &'static str = "RDFDatetimeSeconds";
}

/// Absolute time as a count of `R` units since epoch
///
/// A count of zero is the epoch and also serves as "not set".
#[derive(Debug, Clone)]
pub struct DatetimeValue<R: Resolution> {
    value: u64,
    meta: ValueMeta,
    _resolution: PhantomData<R>,
}

/// Microsecond-resolution datetime
pub type RdfDatetime = DatetimeValue<Microseconds>;

/// Second-resolution datetime
pub type RdfDatetimeSeconds = DatetimeValue<Seconds>;

fn rescale(count: u64, from_units: u64, to_units: u64) -> u64 {
    let scaled = u128::from(count) * u128::from(to_units) / u128::from(from_units);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

impl<R: Resolution> DatetimeValue<R> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create from the raw internal count
    pub fn from_raw(count: u64) -> Self {
        Self {
            value: count,
            meta: ValueMeta::default(),
            _resolution: PhantomData,
        }
    }

    /// Copy the internal count of another datetime
    pub fn copy_from(other: &Self) -> Self {
        Self::from_raw(other.value)
    }

    /// Convert from a datetime of another resolution
    pub fn convert_from<S: Resolution>(other: &DatetimeValue<S>) -> Self {
        Self::from_raw(rescale(
            other.raw(),
            S::UNITS_PER_SECOND,
            R::UNITS_PER_SECOND,
        ))
    }

    /// Create from whole seconds since epoch
    pub fn from_secs(secs: u64) -> Self {
        Self::from_raw(secs.saturating_mul(R::UNITS_PER_SECOND))
    }

    /// Create from microseconds since epoch
    pub fn from_micros(micros: u64) -> Self {
        Self::from_raw(rescale(micros, 1_000_000, R::UNITS_PER_SECOND))
    }

    /// Create from a UTC calendar date/time
    ///
    /// # Errors
    ///
    /// Returns an initialization failure for instants before the epoch.
    pub fn from_chrono(dt: &DateTime<Utc>) -> Result<Self> {
        let secs = u64::try_from(dt.timestamp()).map_err(|_| {
            Error::initialization(format!("{} is before the epoch", dt))
        })?;
        let sub = rescale(
            u64::from(dt.timestamp_subsec_nanos()),
            1_000_000_000,
            R::UNITS_PER_SECOND,
        );
        Ok(Self::from_raw(
            secs.saturating_mul(R::UNITS_PER_SECOND).saturating_add(sub),
        ))
    }

    /// Create from a calendar date/time taken as UTC
    pub fn from_naive(naive: &NaiveDateTime) -> Result<Self> {
        Self::from_chrono(&Utc.from_utc_datetime(naive))
    }

    /// Create from text: a strict integer count, or human-readable text
    /// resolved against the start-of-period anchor
    ///
    /// Empty text is the epoch.
    pub fn from_string(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::from_raw(0));
        }
        match trimmed.parse::<u64>() {
            Ok(count) => Ok(Self::from_raw(count)),
            Err(_) => Self::parse_human(trimmed, DateAnchor::StartOfPeriod),
        }
    }

    /// Parse human-readable text with the given anchor (current year)
    pub fn parse_human(text: &str, anchor: DateAnchor) -> Result<Self> {
        let dt = human::parse_human(text, anchor)?;
        Self::from_chrono(&dt).map_err(|e| Error::decode(e.to_string()))
    }

    /// Parse human-readable text, filling missing components from `default`
    pub fn parse_human_with_default(text: &str, default: NaiveDateTime) -> Result<Self> {
        let dt = human::parse_human_with_default(text, default)?;
        Self::from_chrono(&dt).map_err(|e| Error::decode(e.to_string()))
    }

    /// The current time
    ///
    /// Returns the epoch if the system clock is before it.
    pub fn now() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let count = nanos * u128::from(R::UNITS_PER_SECOND) / 1_000_000_000;
        Self::from_raw(u64::try_from(count).unwrap_or(u64::MAX))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Raw internal count
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.value
    }

    /// Whole seconds since epoch (truncates)
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.value / R::UNITS_PER_SECOND
    }

    /// Microseconds since epoch
    pub fn as_micros(&self) -> u64 {
        rescale(self.value, R::UNITS_PER_SECOND, 1_000_000)
    }

    /// Calendar form
    pub fn to_chrono(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.as_secs()).ok()?;
        let sub_units = self.value % R::UNITS_PER_SECOND;
        let nanos = rescale(sub_units, R::UNITS_PER_SECOND, 1_000_000_000) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }

    /// Format with strftime-style patterns (UTC)
    pub fn format(&self, pattern: &str) -> String {
        match self.to_chrono() {
            Some(dt) => dt.format(pattern).to_string(),
            None => self.value.to_string(),
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the internal count
    pub fn set_raw(&mut self, count: u64) {
        self.value = count;
        self.meta.mark_dirty();
    }

    /// Replace with whole seconds since epoch
    pub fn set_from_secs(&mut self, secs: u64) {
        self.set_raw(secs.saturating_mul(R::UNITS_PER_SECOND));
    }

    /// New datetime offset by `secs` seconds (saturating)
    pub fn offset_by_secs(&self, secs: i64) -> Self {
        Self::from_raw(self.shifted(secs))
    }

    fn shifted(&self, secs: i64) -> u64 {
        let delta = secs.saturating_mul(R::UNITS_PER_SECOND as i64);
        self.value.saturating_add_signed(delta)
    }
}

impl<R: Resolution> Default for DatetimeValue<R> {
    fn default() -> Self {
        Self::from_raw(0)
    }
}

impl<R: Resolution> SemanticValue for DatetimeValue<R> {
    const TYPE_NAME: &'static str = R::TYPE_NAME;
    const STORAGE_TYPE: StorageType = StorageType::UnsignedInteger;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.value.to_string().into_bytes()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::UnsignedInteger(self.value)
    }

    fn meta(&self) -> &ValueMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.meta
    }

    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        OperatorTable::new()
            .with("<", 1, less_than::<F, R>)
            .with(">", 1, greater_than::<F, R>)
            .with("<=", 1, less_than_eq::<F, R>)
            .with(">=", 1, greater_than_eq::<F, R>)
    }
}

// ============================================================================
// Operator builders
// ============================================================================

fn anchored_literal<R: Resolution>(literal: &str, anchor: DateAnchor) -> Result<i64> {
    let value = DatetimeValue::<R>::parse_human(literal, anchor)?;
    i64::try_from(value.raw())
        .map_err(|_| Error::decode(format!("datetime literal '{}' out of range", literal)))
}

/// `<` maps to the inclusive lesser-equal predicate at the start anchor.
///
/// The strict/inclusive mismatch is long-standing observed behavior that
/// consumers depend on; only the anchor distinguishes it from `<=`.
fn less_than<F: FilterImplementation, R: Resolution>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    let value = anchored_literal::<R>(literal, DateAnchor::StartOfPeriod)?;
    Ok(filter.predicate_lesser_equal(attribute, value))
}

fn less_than_eq<F: FilterImplementation, R: Resolution>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    let value = anchored_literal::<R>(literal, DateAnchor::EndOfPeriod)?;
    Ok(filter.predicate_lesser_equal(attribute, value))
}

/// `>` maps to the inclusive greater-equal predicate at the end anchor.
fn greater_than<F: FilterImplementation, R: Resolution>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    let value = anchored_literal::<R>(literal, DateAnchor::EndOfPeriod)?;
    Ok(filter.predicate_greater_equal(attribute, value))
}

fn greater_than_eq<F: FilterImplementation, R: Resolution>(
    attribute: &str,
    filter: &F,
    literal: &str,
) -> Result<F::Predicate> {
    let value = anchored_literal::<R>(literal, DateAnchor::StartOfPeriod)?;
    Ok(filter.predicate_greater_equal(attribute, value))
}

// ============================================================================
// Standard traits
// ============================================================================

impl<R: Resolution> fmt::Display for DatetimeValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_FORMAT))
    }
}

impl<R: Resolution> PartialEq for DatetimeValue<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R: Resolution> Eq for DatetimeValue<R> {}

impl<R: Resolution> PartialOrd for DatetimeValue<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Resolution> Ord for DatetimeValue<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<R: Resolution> Hash for DatetimeValue<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<R: Resolution> From<u64> for DatetimeValue<R> {
    fn from(count: u64) -> Self {
        Self::from_raw(count)
    }
}

impl<R: Resolution> Serialize for DatetimeValue<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de, R: Resolution> Deserialize<'de> for DatetimeValue<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_raw)
    }
}

// ============================================================================
// Arithmetic (seconds)
// ============================================================================

impl<R: Resolution> Add<i64> for &DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn add(self, secs: i64) -> DatetimeValue<R> {
        self.offset_by_secs(secs)
    }
}

impl<R: Resolution> Add<i64> for DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn add(self, secs: i64) -> DatetimeValue<R> {
        self.offset_by_secs(secs)
    }
}

impl<R: Resolution> Add<&Duration> for &DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn add(self, duration: &Duration) -> DatetimeValue<R> {
        self.offset_by_secs(duration.seconds())
    }
}

impl<R: Resolution> Sub<i64> for &DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn sub(self, secs: i64) -> DatetimeValue<R> {
        self.offset_by_secs(secs.saturating_neg())
    }
}

impl<R: Resolution> Sub<i64> for DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn sub(self, secs: i64) -> DatetimeValue<R> {
        self.offset_by_secs(secs.saturating_neg())
    }
}

impl<R: Resolution> Sub<&Duration> for &DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    fn sub(self, duration: &Duration) -> DatetimeValue<R> {
        self.offset_by_secs(duration.seconds().saturating_neg())
    }
}

impl<R: Resolution> Sub<&DatetimeValue<R>> for &DatetimeValue<R> {
    type Output = Duration;

    /// Difference in whole seconds, clamped to the `i64` range
    fn sub(self, other: &DatetimeValue<R>) -> Duration {
        let diff = i128::from(self.as_secs()) - i128::from(other.as_secs());
        let clamped = diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Duration::from_secs(clamped as i64)
    }
}

impl<R: Resolution> Mul<u64> for &DatetimeValue<R> {
    type Output = DatetimeValue<R>;

    /// Rescale the raw count (resolution conversion, not calendar math)
    fn mul(self, factor: u64) -> DatetimeValue<R> {
        DatetimeValue::from_raw(self.value.saturating_mul(factor))
    }
}

impl<R: Resolution> AddAssign<i64> for DatetimeValue<R> {
    fn add_assign(&mut self, secs: i64) {
        let shifted = self.shifted(secs);
        self.set_raw(shifted);
    }
}

impl<R: Resolution> AddAssign<&Duration> for DatetimeValue<R> {
    fn add_assign(&mut self, duration: &Duration) {
        *self += duration.seconds();
    }
}

impl<R: Resolution> SubAssign<i64> for DatetimeValue<R> {
    fn sub_assign(&mut self, secs: i64) {
        let shifted = self.shifted(secs.saturating_neg());
        self.set_raw(shifted);
    }
}

impl<R: Resolution> SubAssign<&Duration> for DatetimeValue<R> {
    fn sub_assign(&mut self, duration: &Duration) {
        *self -= duration.seconds();
    }
}
