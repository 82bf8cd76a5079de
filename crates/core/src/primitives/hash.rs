//! Binary hash digests with a hexadecimal text form

use crate::contract::{SemanticValue, StorageType, StoredValue, ValueMeta};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A binary digest (md5, sha1, sha256, ...)
///
/// Stored and transmitted as raw bytes, displayed as lowercase hex.
/// Equality accepts either the raw digest bytes or its hex text in any case.
#[derive(Debug, Clone, Default)]
pub struct HashDigest {
    value: Vec<u8>,
    meta: ValueMeta,
}

impl HashDigest {
    /// Create from raw digest bytes
    pub fn new(digest: impl Into<Vec<u8>>) -> Self {
        Self {
            value: digest.into(),
            meta: ValueMeta::default(),
        }
    }

    /// Create from hex text
    ///
    /// # Errors
    ///
    /// Returns a decode failure if the text is not valid hexadecimal.
    pub fn from_hex(text: &str) -> Result<Self> {
        hex::decode(text.trim())
            .map(Self::new)
            .map_err(|e| Error::decode(format!("invalid hex digest '{}': {}", text, e)))
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Lowercase hex text
    pub fn to_hex(&self) -> String {
        hex::encode(&self.value)
    }

    /// Digest length in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True for an empty digest
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl SemanticValue for HashDigest {
    const TYPE_NAME: &'static str = "HashDigest";
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

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for HashDigest {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HashDigest {}

impl PartialEq<[u8]> for HashDigest {
    fn eq(&self, other: &[u8]) -> bool {
        self.value == other
    }
}

impl PartialEq<str> for HashDigest {
    /// Raw bytes or hex text (case-insensitive)
    fn eq(&self, other: &str) -> bool {
        self.value == other.as_bytes() || self.to_hex().eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for HashDigest {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for HashDigest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Serialize for HashDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        HashDigest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
