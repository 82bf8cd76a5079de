//! Semantic value types shared across the platform
//!
//! This crate defines the typed values every other component exchanges or
//! persists:
//! - SemanticValue: the wire/storage contract every value implements
//! - Primitives: RdfBytes, RdfString, RdfInteger, RdfBool, HashDigest
//! - Temporal: RdfDatetime, RdfDatetimeSeconds, Duration, human date parsing
//! - ByteSize: byte counts with SI and binary unit prefixes
//! - Urn / Subject / SessionId: the hierarchical addressing scheme
//! - Operator tables: query-token dispatch consumed by the filter engine
//! - TypeRegistry: name → type resolution with late binding
//! - EmbeddedValue: self-describing envelopes
//! - ValuesConfig: `rdfvalue.toml` defaults

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod contract;
pub mod embedded;
pub mod error;
pub mod operators;
pub mod primitives;
pub mod registry;
pub mod size;
pub mod temporal;
pub mod urn;

pub use config::{SessionConfig, ValuesConfig, CONFIG_FILE_NAME};
pub use contract::{Age, AnyValue, SemanticValue, StorageType, StoredValue, ValueMeta};
pub use embedded::EmbeddedValue;
pub use error::{Error, Result};
pub use operators::{FilterImplementation, Operator, OperatorTable, PredicateBuilder};
pub use primitives::{HashDigest, RdfBool, RdfBytes, RdfInteger, RdfString};
pub use registry::{register_builtin_types, TypeDescriptor, TypeRegistry};
pub use size::ByteSize;
pub use temporal::{
    DateAnchor, DatetimeValue, Duration, Microseconds, RdfDatetime, RdfDatetimeSeconds,
    Resolution, Seconds,
};
pub use urn::{FlowSessionId, SessionId, Subject, Urn};
