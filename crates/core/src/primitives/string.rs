//! Text values
//!
//! `RdfString` is the byte value specialised to UTF-8 text. The wire form is
//! the UTF-8 bytes; the storage form is the text itself.

use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use crate::operators::{contains_match, starts_with, FilterImplementation, OperatorTable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice::SliceIndex;

/// A UTF-8 text value
#[derive(Debug, Clone, Default)]
pub struct RdfString {
    value: String,
    meta: ValueMeta,
}

impl RdfString {
    /// Create from text
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            meta: ValueMeta::default(),
        }
    }

    /// Create from bytes, which must be valid UTF-8
    ///
    /// # Errors
    ///
    /// Returns a decode failure if the bytes are not UTF-8.
    pub fn from_utf8(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self::new(String::from_utf8(bytes.into())?))
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume and return the text
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True if the text is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Positional access, as for `str::get`
    pub fn get<I: SliceIndex<str>>(&self, index: I) -> Option<&I::Output> {
        self.value.get(index)
    }

    /// Character at a character (not byte) position
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.value.chars().nth(position)
    }

    /// Replace the text in place
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.meta.mark_dirty();
    }

    /// Substitute `{}`, `{0}` and `{name}` placeholders
    ///
    /// `{}` takes the next positional argument, `{N}` the N-th one, and
    /// `{name}` the named argument. `{{` and `}}` are literal braces.
    ///
    /// # Errors
    ///
    /// Returns a decode failure for an unterminated or unknown placeholder.
    pub fn format(
        &self,
        positional: &[&dyn fmt::Display],
        named: &[(&str, &dyn fmt::Display)],
    ) -> Result<String> {
        let mut out = String::with_capacity(self.value.len());
        let mut chars = self.value.chars().peekable();
        let mut next_auto = 0;

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut key = String::new();
                    let mut closed = false;
                    for k in chars.by_ref() {
                        if k == '}' {
                            closed = true;
                            break;
                        }
                        key.push(k);
                    }
                    if !closed {
                        return Err(Error::decode(format!(
                            "unterminated placeholder in '{}'",
                            self.value
                        )));
                    }
                    let arg: &dyn fmt::Display = if key.is_empty() {
                        let arg = positional.get(next_auto).ok_or_else(|| {
                            Error::decode(format!("missing positional argument {}", next_auto))
                        })?;
                        next_auto += 1;
                        *arg
                    } else if let Ok(idx) = key.parse::<usize>() {
                        *positional.get(idx).ok_or_else(|| {
                            Error::decode(format!("missing positional argument {}", idx))
                        })?
                    } else {
                        named
                            .iter()
                            .find(|(name, _)| *name == key)
                            .map(|(_, v)| *v)
                            .ok_or_else(|| {
                                Error::decode(format!("missing named argument '{}'", key))
                            })?
                    };
                    out.push_str(&arg.to_string());
                }
                '}' => {
                    return Err(Error::decode(format!(
                        "single '}}' in format string '{}'",
                        self.value
                    )));
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}

impl SemanticValue for RdfString {
    const TYPE_NAME: &'static str = "RDFString";
    const STORAGE_TYPE: StorageType = StorageType::String;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Self::from_utf8(raw)
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.value.as_bytes().to_vec()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::String(self.value.clone())
    }

    fn meta(&self) -> &ValueMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.meta
    }

    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        OperatorTable::base()
            .with("matches", 1, contains_match::<F>)
            .with("=", 1, contains_match::<F>)
            .with("startswith", 1, starts_with::<F>)
    }
}

impl fmt::Display for RdfString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq for RdfString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for RdfString {}

impl PartialEq<str> for RdfString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for RdfString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PartialOrd for RdfString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RdfString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for RdfString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl AsRef<str> for RdfString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<String> for RdfString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RdfString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for RdfString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for RdfString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
