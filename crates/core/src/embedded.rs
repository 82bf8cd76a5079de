//! Self-describing value envelopes
//!
//! An [`EmbeddedValue`] carries a value's type name, its age and its wire
//! form, so a receiver can rebuild the value without knowing its type in
//! advance. The envelope itself is encoded with bincode.

use crate::contract::{AnyValue, SemanticValue};
use crate::error::{Error, Result};
use crate::registry::{self, TypeRegistry};
use serde::{Deserialize, Serialize};

/// A value packed with its type name and age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedValue {
    /// Registered type name
    pub name: String,
    /// Age in microseconds since epoch
    pub age: u64,
    /// Wire form
    pub data: Vec<u8>,
}

impl EmbeddedValue {
    /// Pack a concrete value
    pub fn wrap<T: SemanticValue>(value: &T) -> Self {
        Self {
            name: T::TYPE_NAME.to_string(),
            age: value.age().as_micros(),
            data: value.serialize_to_wire(),
        }
    }

    /// Pack a type-erased value
    pub fn wrap_dynamic(value: &dyn AnyValue) -> Self {
        Self {
            name: value.type_name().to_string(),
            age: value.current_age().as_micros(),
            data: value.to_wire(),
        }
    }

    /// Rebuild the value through `registry`, restoring its age
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown type name, or the type's parse
    /// failure for malformed data.
    pub fn unwrap(&self, registry: &TypeRegistry) -> Result<Box<dyn AnyValue>> {
        let mut value = registry.parse_by_name(&self.name, &self.data)?;
        value.set_age_micros(self.age);
        Ok(value)
    }

    /// Rebuild the value through the process-wide registry
    pub fn unwrap_global(&self) -> Result<Box<dyn AnyValue>> {
        let mut value = registry::parse_by_name(&self.name, &self.data)?;
        value.set_age_micros(self.age);
        Ok(value)
    }

    /// Rebuild as a known concrete type
    ///
    /// # Errors
    ///
    /// Returns a decode failure if the envelope names another type.
    pub fn unwrap_as<T: SemanticValue>(&self) -> Result<T> {
        if self.name != T::TYPE_NAME {
            return Err(Error::decode(format!(
                "envelope holds {}, expected {}",
                self.name,
                T::TYPE_NAME
            )));
        }
        let mut value = T::parse_from(&self.data)?;
        value.set_age(self.age);
        Ok(value)
    }

    /// Encode the envelope
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode an envelope
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
