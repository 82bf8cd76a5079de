//! Temporal values
//!
//! - `datetime`: absolute instants at microsecond or second resolution
//! - `duration`: signed whole-second spans with a unit-letter text form
//! - `human`: free-form date/time text parsing against an anchor date

pub mod datetime;
pub mod duration;
pub mod human;

pub use datetime::{
    DatetimeValue, Microseconds, RdfDatetime, RdfDatetimeSeconds, Resolution, Seconds,
    DEFAULT_FORMAT,
};
pub use duration::Duration;
pub use human::DateAnchor;
