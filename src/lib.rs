//! rdfvalue - typed semantic values for an endpoint-investigation platform
//!
//! Every piece of state the platform exchanges or persists (timestamps,
//! durations, byte sizes, resource names, hashes, scalars) is one of the
//! semantic value types defined here, each with a wire form and a storage
//! form that round-trip exactly.
//!
//! # Quick Start
//!
//! ```ignore
//! use rdfvalue::{ByteSize, Duration, SemanticValue, Urn};
//!
//! let size = ByteSize::from_string("1.5Gb")?;
//! assert_eq!(size.bytes(), 1_610_612_736);
//!
//! let lifetime = Duration::from_string("2w")?;
//! assert_eq!(lifetime.to_string(), "2w");
//!
//! let file = Urn::new("aff4:/C.1000/fs/os").add("etc");
//! assert_eq!(file.to_string(), "aff4:/C.1000/fs/os/etc");
//! ```

// Re-export the public API from rdfvalue-core
pub use rdfvalue_core::*;
