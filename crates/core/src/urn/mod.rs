//! Hierarchical addresses
//!
//! Every resource in the platform is named by a [`Urn`]: a normalized
//! slash-separated path rendered with the `aff4:` scheme prefix. Only the
//! normalized path is stored, so two URNs that spell the same path
//! differently are equal.
//!
//! ## Module Structure
//!
//! - `path`: normalization and joining
//! - `session`: [`SessionId`] and the legacy [`FlowSessionId`] shim
//!
//! ## Usage
//!
//! ```ignore
//! let os = Urn::new("aff4:/C.1000/fs/os");
//! assert_eq!(os.add("foo"), Urn::new("aff4:/C.1000/fs/os/foo"));
//! assert_eq!(Urn::new("aff4:/a/b/c").split(Some(2)), vec!["a", "b/c"]);
//! ```

pub mod path;
pub mod session;

pub use session::{FlowSessionId, SessionId, DEFAULT_FLOW_BASE, DEFAULT_FLOW_QUEUE};

use crate::contract::{Age, SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{FilterImplementation, OperatorTable};
use crate::temporal::RdfDatetime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Scheme rendered in front of every path
pub const SCHEME: &str = "aff4";

/// Prefix stripped on parse
const SCHEME_PREFIX: &str = "aff4:/";

/// A normalized resource path
#[derive(Debug, Clone, Default)]
pub struct Urn {
    path: String,
    meta: ValueMeta,
}

impl Urn {
    /// Parse a URN
    ///
    /// A leading `aff4:` is stripped when followed by `/`; everything else is
    /// taken as a path and normalized.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            path: Self::parse_path(text.as_ref()),
            meta: ValueMeta::default(),
        }
    }

    fn parse_path(text: &str) -> String {
        let raw = if text.starts_with(SCHEME_PREFIX) {
            &text[SCHEME.len() + 1..]
        } else {
            text
        };
        path::normalize_path(raw)
    }

    /// Copy another URN's path, dropping its metadata
    pub fn copy_from(other: &Urn) -> Self {
        Self {
            path: other.path.clone(),
            meta: ValueMeta::default(),
        }
    }

    /// Copy of this URN carrying the given age
    pub fn copy_with_age(&self, age: impl Into<Age>) -> Self {
        Self {
            path: self.path.clone(),
            meta: ValueMeta::with_age(age),
        }
    }

    /// Normalized path, without the scheme
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parent path (POSIX `dirname`)
    pub fn dirname(&self) -> &str {
        path::dirname(&self.path)
    }

    /// Last path segment (POSIX `basename`)
    pub fn basename(&self) -> &str {
        path::basename(&self.path)
    }

    /// Parent as a URN
    pub fn parent(&self) -> Urn {
        Urn::new(self.dirname())
    }

    /// New URN with `segment` joined on and normalized, aged now
    ///
    /// The receiver is not modified.
    pub fn add(&self, segment: &str) -> Urn {
        self.add_with_age(segment, RdfDatetime::now())
    }

    /// New URN with `segment` joined on, carrying the given age
    pub fn add_with_age(&self, segment: &str, age: impl Into<Age>) -> Urn {
        Self {
            path: path::join_path(&self.path, segment),
            meta: ValueMeta::with_age(age),
        }
    }

    /// Replace the path (normalized) and mark dirty
    pub fn update_path(&mut self, new_path: &str) {
        self.path = path::normalize_path(new_path);
        self.meta.mark_dirty();
    }

    /// Re-parse from a full URN string and mark dirty
    pub fn update_url(&mut self, url: &str) {
        self.path = Self::parse_path(url);
        self.meta.mark_dirty();
    }

    /// Non-empty path segments
    ///
    /// With `Some(n)` (`n > 0`), exactly `n` entries are returned: the last
    /// absorbs the rest of the path and missing entries are empty strings.
    pub fn split(&self, count: Option<usize>) -> Vec<String> {
        match count {
            Some(n) if n > 0 => {
                let mut parts: Vec<String> = self
                    .path
                    .splitn(n + 1, '/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect();
                while parts.len() < n {
                    parts.push(String::new());
                }
                parts
            }
            _ => self
                .path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Remainder of this URN's rendered text after `volume`'s, with leading
    /// separators stripped
    ///
    /// Returns `None` when this URN does not start with `volume`.
    pub fn relative_name(&self, volume: impl fmt::Display) -> Option<String> {
        let own = self.to_string();
        let prefix = volume.to_string();
        own.strip_prefix(prefix.as_str())
            .map(|rest| rest.trim_start_matches('/').to_string())
    }
}

impl SemanticValue for Urn {
    const TYPE_NAME: &'static str = "RDFURN";
    const STORAGE_TYPE: StorageType = StorageType::String;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Ok(Self::new(std::str::from_utf8(raw)?))
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::String(self.to_string())
    }

    fn meta(&self) -> &ValueMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.meta
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", SCHEME, self.path)
    }
}

impl PartialEq for Urn {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Urn {}

impl PartialEq<str> for Urn {
    /// The string is parsed as a URN first
    fn eq(&self, other: &str) -> bool {
        self.path == Self::parse_path(other)
    }
}

impl PartialEq<&str> for Urn {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd for Urn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Hash for Urn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl From<&str> for Urn {
    fn from(text: &str) -> Self {
        Urn::new(text)
    }
}

impl From<String> for Urn {
    fn from(text: String) -> Self {
        Urn::new(text)
    }
}

impl std::str::FromStr for Urn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Urn::new(s))
    }
}

impl Serialize for Urn {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Urn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Urn::new)
    }
}

// ============================================================================
// Subject
// ============================================================================

/// The subject of a stored object, addressed by URN
///
/// Behaves like [`Urn`] except for its operator table, which filters on the
/// subject itself rather than on an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subject(Urn);

impl Subject {
    /// Parse a subject URN
    pub fn new(text: impl AsRef<str>) -> Self {
        Subject(Urn::new(text))
    }

    /// The underlying URN
    pub fn as_urn(&self) -> &Urn {
        &self.0
    }

    /// Unwrap into the underlying URN
    pub fn into_urn(self) -> Urn {
        self.0
    }
}

impl From<Urn> for Subject {
    fn from(urn: Urn) -> Self {
        Subject(urn)
    }
}

impl AsRef<Urn> for Subject {
    fn as_ref(&self) -> &Urn {
        &self.0
    }
}

fn subject_matches<F: FilterImplementation>(
    _attribute: &str,
    filter: &F,
    regex: &str,
) -> Result<F::Predicate> {
    Ok(filter.subject_contains(regex))
}

fn subject_starts_with<F: FilterImplementation>(
    _attribute: &str,
    filter: &F,
    prefix: &str,
) -> Result<F::Predicate> {
    Ok(filter.subject_contains(&format!("^{}", regex::escape(prefix))))
}

fn subject_has<F: FilterImplementation>(
    _attribute: &str,
    filter: &F,
    attribute: &str,
) -> Result<F::Predicate> {
    Ok(filter.has_predicate(attribute))
}

impl SemanticValue for Subject {
    const TYPE_NAME: &'static str = "Subject";
    const STORAGE_TYPE: StorageType = StorageType::String;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Urn::parse_from(raw).map(Subject)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.0.serialize_to_wire()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        self.0.serialize_to_storage()
    }

    fn meta(&self) -> &ValueMeta {
        &self.0.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.0.meta
    }

    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        OperatorTable::new()
            .with("matches", 1, subject_matches::<F>)
            .with("contains", 1, subject_matches::<F>)
            .with("startswith", 1, subject_starts_with::<F>)
            .with("has", 1, subject_has::<F>)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Urn::deserialize(deserializer).map(Subject)
    }
}
