//! Primitive values
//!
//! - `RdfBytes`: raw bytes
//! - `RdfString`: UTF-8 text
//! - `RdfInteger` / `RdfBool`: whole numbers and flags
//! - `HashDigest`: binary digests shown as hex

pub mod bytes;
pub mod hash;
pub mod integer;
pub mod string;

pub use bytes::RdfBytes;
pub use hash::HashDigest;
pub use integer::{RdfBool, RdfInteger};
pub use string::RdfString;
