//! SessionID: basename validation on every construction path

use crate::common::*;
use proptest::prelude::*;

#[test]
fn test_documented_basenames() {
    let id = SessionId::from_string("aff4:/flows/H:1A2B3C").unwrap();
    assert_eq!(id.queue(), Urn::new("aff4:/H"));
    assert_eq!(id.queue().basename(), "H");
    assert_eq!(id.flow_name(), "1A2B3C");

    let err = SessionId::from_string("aff4:/flows/bad basename").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_synthesized_from_config() {
    let config = ValuesConfig::from_toml_str("[session]\nbase = \"aff4:/hunts\"\nqueue = \"H\"\n")
        .unwrap();
    let id = SessionId::from_config(&config.session, None).unwrap();
    assert!(id.to_string().starts_with("aff4:/hunts/H:"));
    assert!(!id.flow_name().is_empty());
}

#[test]
fn test_add_degrades_to_plain_urn() {
    let id = SessionId::from_string("aff4:/flows/W:ABC").unwrap();
    let child = id.add("responses");
    assert_eq!(child, Urn::new("aff4:/flows/W:ABC/responses"));
    assert!(SessionId::try_from(child).is_err());
}

#[test]
fn test_supplied_flow_name_stays_on_queue() {
    assert!(SessionId::with_flow_name("../../evil/H:1")
        .unwrap_err()
        .is_validation());
    let config = ValuesConfig::default();
    assert!(SessionId::from_config(&config.session, Some("../x")).is_err());
    assert!(SessionId::from_config(&config.session, Some("a/b")).is_err());

    let id = SessionId::from_config(&config.session, Some("CAFE")).unwrap();
    assert_eq!(id.queue(), Urn::new("aff4:/F"));
    assert_eq!(id.as_urn().dirname(), "/flows");
}

#[test]
fn test_legacy_shim_qualifies_then_validates() {
    let id = FlowSessionId::from_string("W:CAFE").unwrap();
    assert_eq!(id.as_session_id().path(), "/flows/W:CAFE");
    assert!(FlowSessionId::from_string("not valid").is_err());

    let via_registry = registry::parse_by_name("FlowSessionID", b"W:CAFE").unwrap();
    assert_eq!(via_registry.to_string(), "aff4:/flows/W:CAFE");
}

proptest! {
    #[test]
    fn prop_valid_basenames_accepted(basename in session_basename()) {
        let id = SessionId::from_string(&format!("aff4:/flows/{}", basename)).unwrap();
        let (queue, flow) = basename.split_once(':').unwrap();
        let queue_urn = id.queue();
        prop_assert_eq!(queue_urn.basename(), queue);
        prop_assert_eq!(id.flow_name(), flow);
        prop_assert_eq!(SessionId::parse_from(&id.serialize_to_wire()).unwrap(), id);
    }

    #[test]
    fn prop_basenames_without_colon_rejected(name in "[0-9a-zA-Z]{1,12}") {
        let text = format!("aff4:/flows/{}", name);
        prop_assert!(SessionId::from_string(&text).is_err());
    }
}
