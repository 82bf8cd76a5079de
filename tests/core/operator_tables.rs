//! Operator tables: token dispatch and literal conversion per type

use crate::common::*;

const START_2020_SECS: i64 = 1_577_836_800;
const END_2020_SECS: i64 = 1_609_459_140;

fn build<T: SemanticValue>(token: &str, literal: &str) -> Result<Predicate> {
    T::operators::<CapturingFilter>().build(token, "attr", &CapturingFilter, literal)
}

fn tokens<T: SemanticValue>() -> Vec<&'static str> {
    T::operators::<CapturingFilter>().tokens().collect()
}

#[test]
fn test_token_sets() {
    assert_eq!(tokens::<RdfBytes>(), vec!["contains"]);
    assert_eq!(tokens::<HashDigest>(), vec!["contains"]);
    assert_eq!(tokens::<Urn>(), vec!["contains"]);
    assert_eq!(
        tokens::<RdfString>(),
        vec!["=", "contains", "matches", "startswith"]
    );
    assert_eq!(tokens::<RdfInteger>(), vec!["<", "=", ">"]);
    assert_eq!(tokens::<RdfBool>(), vec!["<", "=", ">"]);
    assert_eq!(tokens::<Duration>(), vec!["<", "=", ">"]);
    assert_eq!(tokens::<ByteSize>(), vec!["<", "=", ">"]);
    assert_eq!(tokens::<RdfDatetime>(), vec!["<", "<=", ">", ">="]);
    assert_eq!(
        tokens::<Subject>(),
        vec!["contains", "has", "matches", "startswith"]
    );
}

#[test]
fn test_string_equality_is_regex_match() {
    assert_eq!(
        build::<RdfString>("=", "foo.*").unwrap(),
        Predicate::Contains {
            attribute: "attr".into(),
            regex: "foo.*".into()
        }
    );
    assert_eq!(
        build::<RdfString>("startswith", "a.b").unwrap(),
        Predicate::Contains {
            attribute: "attr".into(),
            regex: "^a\\.b".into()
        }
    );
}

#[test]
fn test_numeric_literals_in_storage_units() {
    assert_eq!(
        build::<RdfInteger>("<", "100").unwrap(),
        Predicate::LessThan {
            attribute: "attr".into(),
            value: 100
        }
    );
    assert_eq!(
        build::<Duration>(">", "2h").unwrap(),
        Predicate::GreaterThan {
            attribute: "attr".into(),
            value: 7200
        }
    );
    assert_eq!(
        build::<ByteSize>("=", "2Kb").unwrap(),
        Predicate::NumericEqual {
            attribute: "attr".into(),
            value: 2048
        }
    );
    assert!(build::<RdfInteger>("<", "ten").unwrap_err().is_decode());
}

#[test]
fn test_datetime_anchors_per_token() {
    let micros = |secs: i64| secs * 1_000_000;
    assert_eq!(
        build::<RdfDatetime>("<", "2020").unwrap(),
        Predicate::LesserEqual {
            attribute: "attr".into(),
            value: micros(START_2020_SECS)
        }
    );
    assert_eq!(
        build::<RdfDatetime>("<=", "2020").unwrap(),
        Predicate::LesserEqual {
            attribute: "attr".into(),
            value: micros(END_2020_SECS)
        }
    );
    assert_eq!(
        build::<RdfDatetime>(">", "2020").unwrap(),
        Predicate::GreaterEqual {
            attribute: "attr".into(),
            value: micros(END_2020_SECS)
        }
    );
    assert_eq!(
        build::<RdfDatetime>(">=", "2020").unwrap(),
        Predicate::GreaterEqual {
            attribute: "attr".into(),
            value: micros(START_2020_SECS)
        }
    );
}

#[test]
fn test_seconds_datetime_uses_seconds() {
    assert_eq!(
        build::<RdfDatetimeSeconds>(">=", "2020").unwrap(),
        Predicate::GreaterEqual {
            attribute: "attr".into(),
            value: START_2020_SECS
        }
    );
}

#[test]
fn test_subject_predicates_ignore_attribute() {
    assert_eq!(
        build::<Subject>("matches", "C\\.1.*").unwrap(),
        Predicate::SubjectContains {
            regex: "C\\.1.*".into()
        }
    );
    assert_eq!(
        build::<Subject>("startswith", "aff4:/C.1").unwrap(),
        Predicate::SubjectContains {
            regex: "^aff4:/C\\.1".into()
        }
    );
    assert_eq!(
        build::<Subject>("has", "metadata:hostname").unwrap(),
        Predicate::HasPredicate {
            attribute: "metadata:hostname".into()
        }
    );
}

#[test]
fn test_unknown_token_not_found() {
    let err = build::<RdfBytes>("<", "1").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    let err = build::<Duration>("contains", "1h").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
