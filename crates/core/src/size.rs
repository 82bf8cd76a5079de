//! Byte counts with unit prefixes
//!
//! Parsing accepts `<magnitude><unit>[b]` where the unit is one of
//! [`DIVIDERS`]: SI prefixes (`k`, `m`, `g`) are powers of 1000, binary
//! prefixes (`ki`, `mi`, `gi`) are powers of 1024. The canonical text form
//! always uses binary divisors (`1.5Gb`, `12.0Kb`, `512b`).
//!
//! The display labels are read back with the divisors they were written
//! with, so `"1.5Gb"` parses to `1.5 * 1024^3`. Any other spelling of the
//! same letters (`"1.5gb"`, `"1.5GB"`) goes through the prefix table above.

use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{numeric_table, FilterImplementation, NumericLiteral, OperatorTable};
use crate::primitives::RdfInteger;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unit prefixes and their multipliers
pub const DIVIDERS: [(&str, u64); 7] = [
    ("", 1),
    ("k", 1000),
    ("m", 1000 * 1000),
    ("g", 1000 * 1000 * 1000),
    ("ki", 1024),
    ("mi", 1024 * 1024),
    ("gi", 1024 * 1024 * 1024),
];

/// Display divisors, largest first
const DISPLAY_UNITS: [(&str, u64); 3] = [
    ("Gb", 1024 * 1024 * 1024),
    ("Mb", 1024 * 1024),
    ("Kb", 1024),
];

static BYTE_SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9.]+)([kmgi]*)b?$").expect("byte size regex is valid"));

/// Parse a human-readable byte count
///
/// Only the exact, case-sensitive display labels `Gb`, `Mb` and `Kb` take
/// binary multipliers, so the output of [`format_byte_size`] reads back
/// unchanged. Every other spelling is lowercased first and `k`/`m`/`g` are
/// SI: `"1.5Gb"` is 1610612736 bytes while `"1.5GB"` and `"1.5gb"` are
/// 1500000000. Use `ki`/`mi`/`gi` for binary multiples in free text.
///
/// Empty text is zero bytes. A decimal magnitude is multiplied out and the
/// fractional byte count truncated.
pub fn parse_byte_size(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Some((magnitude, divisor)) = display_label(trimmed) {
        return scale(magnitude, divisor, text);
    }

    let normalized = trimmed.to_lowercase();
    let captures = BYTE_SIZE_PATTERN
        .captures(&normalized)
        .ok_or_else(|| Error::decode(format!("unrecognized ByteSize '{}'", text)))?;
    let unit = &captures[2];

    let multiplier = DIVIDERS
        .iter()
        .find(|(prefix, _)| *prefix == unit)
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(|| Error::decode(format!("invalid multiplier '{}' in '{}'", unit, text)))?;

    scale(&captures[1], multiplier, text)
}

/// Split off a canonical display label (`Gb`, `Mb`, `Kb`)
fn display_label(text: &str) -> Option<(&str, u64)> {
    DISPLAY_UNITS.iter().find_map(|(label, divisor)| {
        let magnitude = text.strip_suffix(label)?;
        let well_formed =
            !magnitude.is_empty() && magnitude.chars().all(|c| c.is_ascii_digit() || c == '.');
        well_formed.then_some((magnitude, *divisor))
    })
}

fn scale(magnitude: &str, multiplier: u64, text: &str) -> Result<u64> {
    if magnitude.contains('.') {
        let value: f64 = magnitude.parse().map_err(|_| {
            Error::decode(format!("invalid magnitude '{}' in '{}'", magnitude, text))
        })?;
        Ok((value * multiplier as f64) as u64)
    } else {
        let value: u64 = magnitude.parse().map_err(|_| {
            Error::decode(format!("invalid magnitude '{}' in '{}'", magnitude, text))
        })?;
        value
            .checked_mul(multiplier)
            .ok_or_else(|| Error::decode(format!("byte size '{}' out of range", text)))
    }
}

/// Render a byte count in the canonical form
pub fn format_byte_size(bytes: u64) -> String {
    for (label, divisor) in DISPLAY_UNITS {
        if bytes > divisor {
            return format!("{:.1}{}", bytes as f64 / divisor as f64, label);
        }
    }
    format!("{}b", bytes)
}

/// A non-negative count of bytes
#[derive(Debug, Clone, Default)]
pub struct ByteSize {
    value: u64,
    meta: ValueMeta,
}

impl ByteSize {
    /// Create from a byte count
    pub fn new(bytes: u64) -> Self {
        Self {
            value: bytes,
            meta: ValueMeta::default(),
        }
    }

    /// Parse human-readable text (`"1.5Gb"`, `"10kib"`, `"512"`)
    pub fn from_string(text: &str) -> Result<Self> {
        parse_byte_size(text).map(Self::new)
    }

    /// Copy the count of another byte size
    pub fn copy_from(other: &ByteSize) -> Self {
        Self::new(other.value)
    }

    /// Take the count of an integer value
    ///
    /// # Errors
    ///
    /// Returns an initialization failure for negative integers.
    pub fn from_integer(other: &RdfInteger) -> Result<Self> {
        u64::try_from(other.value())
            .map(Self::new)
            .map_err(|_| Error::initialization(format!("negative byte size {}", other.value())))
    }

    /// Byte count
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.value
    }

    /// Replace the count
    pub fn set(&mut self, bytes: u64) {
        self.value = bytes;
        self.meta.mark_dirty();
    }
}

impl NumericLiteral for ByteSize {
    fn parse_literal(literal: &str) -> Result<i64> {
        let bytes = parse_byte_size(literal)?;
        i64::try_from(bytes)
            .map_err(|_| Error::decode(format!("byte size literal '{}' out of range", literal)))
    }
}

impl SemanticValue for ByteSize {
    const TYPE_NAME: &'static str = "ByteSize";
    const STORAGE_TYPE: StorageType = StorageType::UnsignedInteger;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_string(std::str::from_utf8(raw)?)
    }

    /// Exact decimal count; the display form rounds
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
        numeric_table::<F, ByteSize>()
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_byte_size(self.value))
    }
}

impl PartialEq for ByteSize {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ByteSize {}

impl PartialEq<u64> for ByteSize {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl PartialOrd for ByteSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for ByteSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self::new(bytes)
    }
}

impl std::str::FromStr for ByteSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}
