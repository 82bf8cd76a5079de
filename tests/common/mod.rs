//! Shared test utilities for the integration suites.
//!
//! Import from a suite's main.rs with
//! `#[path = "../common/mod.rs"] mod common;`.

#![allow(dead_code)]
#![allow(unused_imports)]

pub use rdfvalue::*;

use proptest::prelude::*;

// ============================================================================
// Filter engine stand-in
// ============================================================================

/// A predicate as the filter engine would receive it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Contains { attribute: String, regex: String },
    LessThan { attribute: String, value: i64 },
    GreaterThan { attribute: String, value: i64 },
    NumericEqual { attribute: String, value: i64 },
    LesserEqual { attribute: String, value: i64 },
    GreaterEqual { attribute: String, value: i64 },
    SubjectContains { regex: String },
    HasPredicate { attribute: String },
}

/// Filter implementation that records which predicate was requested
pub struct CapturingFilter;

impl FilterImplementation for CapturingFilter {
    type Predicate = Predicate;

    fn predicate_contains(&self, attribute: &str, regex: &str) -> Predicate {
        Predicate::Contains {
            attribute: attribute.to_string(),
            regex: regex.to_string(),
        }
    }

    fn predicate_less_than(&self, attribute: &str, value: i64) -> Predicate {
        Predicate::LessThan {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn predicate_greater_than(&self, attribute: &str, value: i64) -> Predicate {
        Predicate::GreaterThan {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn predicate_numeric_equal(&self, attribute: &str, value: i64) -> Predicate {
        Predicate::NumericEqual {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn predicate_lesser_equal(&self, attribute: &str, value: i64) -> Predicate {
        Predicate::LesserEqual {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn predicate_greater_equal(&self, attribute: &str, value: i64) -> Predicate {
        Predicate::GreaterEqual {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn subject_contains(&self, regex: &str) -> Predicate {
        Predicate::SubjectContains {
            regex: regex.to_string(),
        }
    }

    fn has_predicate(&self, attribute: &str) -> Predicate {
        Predicate::HasPredicate {
            attribute: attribute.to_string(),
        }
    }
}

// ============================================================================
// Strategies
// ============================================================================

/// A single path segment (no separators, never `.` or `..`)
pub fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_][A-Za-z0-9_.:-]{0,8}".prop_filter("relative segment", |s| s != "." && s != "..")
}

/// Raw path text, possibly denormalized
pub fn messy_path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            segment(),
            Just(String::new()),
            Just(".".to_string()),
            Just("..".to_string()),
        ],
        0..8,
    )
    .prop_map(|parts| parts.join("/"))
}

/// A valid `queue:flow` basename
pub fn session_basename() -> impl Strategy<Value = String> {
    ("[-0-9a-zA-Z]{1,10}", "[0-9a-zA-Z]{1,12}").prop_map(|(q, f)| format!("{}:{}", q, f))
}
