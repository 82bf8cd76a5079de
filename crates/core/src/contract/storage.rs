//! Storage tags and the tagged storage form
//!
//! The external key-value store understands exactly four representations.
//! Every value type declares which one it emits.
//!
//! ## StorageType Values
//!
//! These names are shared with the store and MUST NOT change:
//! - Bytes = "bytes"
//! - String = "string"
//! - Integer = "integer"
//! - UnsignedInteger = "unsigned_integer"

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag describing the storage representation of a value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    /// Raw bytes
    Bytes,
    /// UTF-8 text
    String,
    /// Signed integer
    Integer,
    /// Unsigned integer (also used for flag semantics)
    UnsignedInteger,
}

impl StorageType {
    /// All storage types (for iteration)
    pub const ALL: [StorageType; 4] = [
        StorageType::Bytes,
        StorageType::String,
        StorageType::Integer,
        StorageType::UnsignedInteger,
    ];

    /// Name understood by the store
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageType::Bytes => "bytes",
            StorageType::String => "string",
            StorageType::Integer => "integer",
            StorageType::UnsignedInteger => "unsigned_integer",
        }
    }

    /// Parse from the store's name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bytes" => Some(StorageType::Bytes),
            "string" => Some(StorageType::String),
            "integer" => Some(StorageType::Integer),
            "unsigned_integer" => Some(StorageType::UnsignedInteger),
            _ => None,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value in its storage form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredValue {
    /// Raw bytes
    Bytes(Vec<u8>),
    /// UTF-8 text
    String(String),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer
    UnsignedInteger(u64),
}

impl StoredValue {
    /// Tag of this representation
    pub fn storage_type(&self) -> StorageType {
        match self {
            StoredValue::Bytes(_) => StorageType::Bytes,
            StoredValue::String(_) => StorageType::String,
            StoredValue::Integer(_) => StorageType::Integer,
            StoredValue::UnsignedInteger(_) => StorageType::UnsignedInteger,
        }
    }

    /// Bytes suitable for a type's wire parser
    ///
    /// Integers become their decimal text, which every numeric type accepts
    /// as wire input.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Bytes(b) => b.clone(),
            StoredValue::String(s) => s.as_bytes().to_vec(),
            StoredValue::Integer(i) => i.to_string().into_bytes(),
            StoredValue::UnsignedInteger(u) => u.to_string().into_bytes(),
        }
    }

    /// Encode for the store
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the store
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(Error::from)
    }
}
