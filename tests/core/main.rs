//! Integration tests for the semantic value layer, one module per
//! invariant family.

#[path = "../common/mod.rs"]
mod common;

mod byte_size;
mod datetime;
mod duration;
mod embedded;
mod operator_tables;
mod registry;
mod round_trip;
mod session_id;
mod urn;
mod values_config;
