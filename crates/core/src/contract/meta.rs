//! Per-value metadata

use crate::temporal::{DatetimeValue, RdfDatetime, Resolution};

/// Age of a value, held as a raw microsecond count
///
/// Any raw number can be assigned; it is coerced into an [`RdfDatetime`]
/// when read back through [`ValueMeta::age`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u64);

impl Age {
    /// Create an age from microseconds since epoch
    pub const fn from_micros(micros: u64) -> Self {
        Age(micros)
    }

    /// Raw microsecond count
    pub const fn as_micros(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Age {
    fn from(micros: u64) -> Self {
        Age(micros)
    }
}

impl<R: Resolution> From<DatetimeValue<R>> for Age {
    fn from(value: DatetimeValue<R>) -> Self {
        Age(value.as_micros())
    }
}

impl<R: Resolution> From<&DatetimeValue<R>> for Age {
    fn from(value: &DatetimeValue<R>) -> Self {
        Age(value.as_micros())
    }
}

/// Metadata carried by every semantic value
///
/// None of these fields take part in value equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMeta {
    age: Age,
    dirty: bool,
    attribute: Option<String>,
}

impl ValueMeta {
    /// Metadata with the given age
    pub fn with_age(age: impl Into<Age>) -> Self {
        Self {
            age: age.into(),
            ..Self::default()
        }
    }

    /// Age resolved to an absolute time
    pub fn age(&self) -> RdfDatetime {
        RdfDatetime::from_raw(self.age.as_micros())
    }

    /// Raw age
    pub fn raw_age(&self) -> Age {
        self.age
    }

    /// Assign the age
    pub fn set_age(&mut self, age: impl Into<Age>) {
        self.age = age.into();
    }

    /// True if the owning value was mutated in place
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the owning value as mutated
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag (after the value has been flushed)
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Attribute/schema slot that produced the owning value, if any
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Record the attribute/schema slot that produced the owning value
    pub fn set_attribute(&mut self, attribute: impl Into<String>) {
        self.attribute = Some(attribute.into());
    }
}
