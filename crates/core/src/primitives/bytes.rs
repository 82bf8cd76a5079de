//! Raw byte values

use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value holding raw bytes exactly as given
#[derive(Debug, Clone, Default)]
pub struct RdfBytes {
    value: Vec<u8>,
    meta: ValueMeta,
}

impl RdfBytes {
    /// Create from raw bytes
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            meta: ValueMeta::default(),
        }
    }

    /// Borrow the bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Consume and return the bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.value
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True if there are no bytes
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the bytes in place
    pub fn set(&mut self, value: impl Into<Vec<u8>>) {
        self.value = value.into();
        self.meta.mark_dirty();
    }
}

impl SemanticValue for RdfBytes {
    const TYPE_NAME: &'static str = "RDFBytes";
    const STORAGE_TYPE: StorageType = StorageType::Bytes;

    fn parse_from(raw: &[u8]) -> Result<Self> {
        Ok(Self::new(raw))
    }

    fn serialize_to_wire(&self) -> Vec<u8> {
        self.value.clone()
    }

    fn serialize_to_storage(&self) -> StoredValue {
        StoredValue::Bytes(self.value.clone())
    }

    fn meta(&self) -> &ValueMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        &mut self.meta
    }
}

impl fmt::Display for RdfBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.value))
    }
}

impl PartialEq for RdfBytes {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for RdfBytes {}

impl PartialEq<[u8]> for RdfBytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.value == other
    }
}

impl PartialEq<&[u8]> for RdfBytes {
    fn eq(&self, other: &&[u8]) -> bool {
        self.value == *other
    }
}

impl PartialOrd for RdfBytes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RdfBytes {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for RdfBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl AsRef<[u8]> for RdfBytes {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

impl From<Vec<u8>> for RdfBytes {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for RdfBytes {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RdfBytes {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl Serialize for RdfBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.value)
    }
}

impl<'de> Deserialize<'de> for RdfBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<u8>::deserialize(deserializer).map(Self::new)
    }
}
