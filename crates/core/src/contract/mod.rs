//! The semantic value contract
//!
//! Every value exchanged or persisted by the platform implements
//! [`SemanticValue`]. The contract fixes two independent serialized forms:
//!
//! - **wire form**: bytes exchanged between processes, read back with
//!   [`SemanticValue::parse_from`]
//! - **storage form**: a [`StoredValue`] tagged with a [`StorageType`], read
//!   back with [`SemanticValue::parse_from_storage`]
//!
//! ## Invariants
//!
//! - `T::parse_from(&v.serialize_to_wire())` is equal to `v`
//! - Equal wire forms hash equal ([`SemanticValue::wire_hash`])
//! - Metadata (age, dirty flag, attribute slot) never takes part in equality
//!
//! ## Module Structure
//!
//! - `meta`: age/dirty/attribute metadata carried by every value
//! - `storage`: storage tags and the tagged storage form
//! - `dynamic`: the object-safe face of the contract used by the registry

pub mod dynamic;
pub mod meta;
pub mod storage;

pub use dynamic::AnyValue;
pub use meta::{Age, ValueMeta};
pub use storage::{StorageType, StoredValue};

use crate::error::Result;
use crate::operators::{FilterImplementation, OperatorTable};
use crate::temporal::RdfDatetime;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::Hasher;

/// The interface every concrete value type implements
///
/// Construction goes through each type's named constructors; the contract
/// covers what the store, the wire, and the filter engine need from a value
/// once it exists.
pub trait SemanticValue: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name the type is registered under
    const TYPE_NAME: &'static str;

    /// Tag of the representation produced by `serialize_to_storage`
    const STORAGE_TYPE: StorageType;

    /// Parse a value from its wire form (or from human text, for the types
    /// that accept it)
    ///
    /// # Errors
    ///
    /// Returns a decode failure on malformed input. No value is produced.
    fn parse_from(raw: &[u8]) -> Result<Self>;

    /// Produce the canonical wire representation
    fn serialize_to_wire(&self) -> Vec<u8>;

    /// Produce the storage representation
    fn serialize_to_storage(&self) -> StoredValue;

    /// Parse a value back from its storage representation
    fn parse_from_storage(stored: &StoredValue) -> Result<Self> {
        Self::parse_from(&stored.to_wire_bytes())
    }

    /// Metadata carried by this value
    fn meta(&self) -> &ValueMeta;

    /// Mutable metadata carried by this value
    fn meta_mut(&mut self) -> &mut ValueMeta;

    /// Age of this value as an absolute time
    fn age(&self) -> RdfDatetime {
        self.meta().age()
    }

    /// Assign the age from a datetime or a raw microsecond count
    fn set_age(&mut self, age: impl Into<Age>) {
        self.meta_mut().set_age(age);
    }

    /// True if the value was mutated in place since creation
    fn is_dirty(&self) -> bool {
        self.meta().is_dirty()
    }

    /// Independent clone
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Iterate over this value as a single-element sequence
    ///
    /// Lets code that consumes "zero or more values" treat a scalar field the
    /// same way as a multi-valued one.
    fn values(&self) -> std::iter::Once<&Self> {
        std::iter::once(self)
    }

    /// Human-readable summary
    fn summary(&self) -> String {
        self.to_string()
    }

    /// Queryable sub-field names (empty for scalar leaves)
    fn fields() -> &'static [&'static str] {
        &[]
    }

    /// Operator table consumed by the filter engine
    fn operators<F: FilterImplementation>() -> OperatorTable<F> {
        OperatorTable::base()
    }

    /// Hash of the wire form
    fn wire_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hasher.write(&self.serialize_to_wire());
        hasher.finish()
    }
}
