//! Type-erased values
//!
//! [`SemanticValue`] carries associated constants and constructors, so it
//! cannot be used as a trait object. Consumers that resolve a type by name
//! through the registry hold an [`AnyValue`] instead and downcast when they
//! know the concrete type.

use super::{Age, SemanticValue, StorageType, StoredValue};
use crate::temporal::RdfDatetime;
use std::any::Any;
use std::fmt;

/// Object-safe face of the value contract
pub trait AnyValue: fmt::Debug + fmt::Display + Send + Sync {
    /// Registered type name
    fn type_name(&self) -> &'static str;

    /// Storage tag
    fn storage_type(&self) -> StorageType;

    /// Canonical wire form
    fn to_wire(&self) -> Vec<u8>;

    /// Storage form
    fn to_storage(&self) -> StoredValue;

    /// Human-readable summary
    fn summarize(&self) -> String;

    /// Age of the value
    fn current_age(&self) -> RdfDatetime;

    /// Assign the age from a raw microsecond count
    fn set_age_micros(&mut self, micros: u64);

    /// Independent clone
    fn clone_boxed(&self) -> Box<dyn AnyValue>;

    /// Access for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: SemanticValue> AnyValue for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn storage_type(&self) -> StorageType {
        T::STORAGE_TYPE
    }

    fn to_wire(&self) -> Vec<u8> {
        self.serialize_to_wire()
    }

    fn to_storage(&self) -> StoredValue {
        self.serialize_to_storage()
    }

    fn summarize(&self) -> String {
        SemanticValue::summary(self)
    }

    fn current_age(&self) -> RdfDatetime {
        SemanticValue::age(self)
    }

    fn set_age_micros(&mut self, micros: u64) {
        SemanticValue::set_age(self, Age::from_micros(micros));
    }

    fn clone_boxed(&self) -> Box<dyn AnyValue> {
        Box::new(self.copy())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AnyValue {
    /// Downcast to a concrete value type
    pub fn downcast_ref<T: SemanticValue>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn AnyValue> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}
