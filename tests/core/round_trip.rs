//! Wire and storage round trips across the built-in types

use crate::common::*;
use proptest::prelude::*;

fn wire_round_trip<T: SemanticValue + PartialEq>(value: &T) -> T {
    T::parse_from(&value.serialize_to_wire()).unwrap()
}

fn storage_round_trip<T: SemanticValue + PartialEq>(value: &T) -> T {
    let stored = value.serialize_to_storage();
    assert_eq!(stored.storage_type(), T::STORAGE_TYPE);
    let bytes = stored.to_bytes().unwrap();
    T::parse_from_storage(&StoredValue::from_bytes(&bytes).unwrap()).unwrap()
}

#[test]
fn test_storage_form_per_type() {
    assert_eq!(
        RdfInteger::new(-3).serialize_to_storage(),
        StoredValue::Integer(-3)
    );
    assert_eq!(
        ByteSize::new(10).serialize_to_storage(),
        StoredValue::UnsignedInteger(10)
    );
    assert_eq!(
        Duration::from_secs(-60).serialize_to_storage(),
        StoredValue::Integer(-60)
    );
    assert_eq!(
        Urn::new("aff4:/a").serialize_to_storage(),
        StoredValue::String("aff4:/a".into())
    );
    assert_eq!(
        RdfBytes::new(vec![1, 2]).serialize_to_storage(),
        StoredValue::Bytes(vec![1, 2])
    );
}

#[test]
fn test_storage_round_trips() {
    let urn = Urn::new("aff4:/C.1/fs/os");
    assert_eq!(storage_round_trip(&urn), urn);
    let when = RdfDatetime::from_secs(1_600_000_000);
    assert_eq!(storage_round_trip(&when), when);
    let session = SessionId::from_string("aff4:/flows/F:ABC").unwrap();
    assert_eq!(storage_round_trip(&session), session);
    let digest = HashDigest::new(vec![0xde, 0xad]);
    assert_eq!(storage_round_trip(&digest), digest);
}

#[test]
fn test_round_trip_is_metadata_free() {
    let mut value = RdfString::new("x");
    value.set_age(99u64);
    let restored = wire_round_trip(&value);
    assert_eq!(restored, value);
    assert_eq!(restored.age().as_micros(), 0);
}

#[test]
fn test_serde_forms() {
    let urn = Urn::new("aff4:/C.1/fs");
    assert_eq!(serde_json::to_string(&urn).unwrap(), "\"aff4:/C.1/fs\"");
    assert_eq!(serde_json::from_str::<Urn>("\"aff4:/C.1//fs/\"").unwrap(), urn);

    let duration = Duration::from_secs(7200);
    assert_eq!(serde_json::to_string(&duration).unwrap(), "\"2h\"");
    assert_eq!(serde_json::from_str::<Duration>("\"2h\"").unwrap(), duration);

    assert_eq!(serde_json::to_string(&ByteSize::new(10)).unwrap(), "10");
    assert!(serde_json::from_str::<SessionId>("\"aff4:/flows/nocolon\"").is_err());
}

proptest! {
    #[test]
    fn prop_integer(n in any::<i64>()) {
        let value = RdfInteger::new(n);
        prop_assert_eq!(wire_round_trip(&value), value.clone());
        prop_assert_eq!(storage_round_trip(&value), value);
    }

    #[test]
    fn prop_string(text in ".*") {
        let value = RdfString::new(text);
        prop_assert_eq!(wire_round_trip(&value), value.clone());
        prop_assert_eq!(storage_round_trip(&value), value);
    }

    #[test]
    fn prop_bytes(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let value = RdfBytes::new(data);
        prop_assert_eq!(wire_round_trip(&value), value);
    }

    #[test]
    fn prop_datetime(raw in any::<u64>()) {
        let micros = RdfDatetime::from_raw(raw);
        prop_assert_eq!(wire_round_trip(&micros), micros);
        let secs = RdfDatetimeSeconds::from_raw(raw);
        prop_assert_eq!(wire_round_trip(&secs), secs);
    }

    #[test]
    fn prop_duration(secs in any::<i64>()) {
        let value = Duration::from_secs(secs);
        prop_assert_eq!(wire_round_trip(&value), value.clone());
        prop_assert_eq!(storage_round_trip(&value), value);
    }

    #[test]
    fn prop_urn(path in messy_path()) {
        let value = Urn::new(&path);
        prop_assert_eq!(wire_round_trip(&value), value.clone());
        let subject = Subject::from(value.clone());
        prop_assert_eq!(subject.as_urn(), &value);
    }

    #[test]
    fn prop_equal_values_hash_equal(n in any::<u32>()) {
        let a = ByteSize::new(u64::from(n));
        let b = ByteSize::parse_from(&a.serialize_to_wire()).unwrap();
        prop_assert_eq!(a.wire_hash(), b.wire_hash());
    }

    #[test]
    fn prop_dynamic_matches_static(n in any::<i64>()) {
        let value = RdfInteger::new(n);
        let dynamic = registry::parse_by_name("RDFInteger", &value.serialize_to_wire()).unwrap();
        prop_assert_eq!(dynamic.to_wire(), value.serialize_to_wire());
        prop_assert_eq!(dynamic.storage_type(), StorageType::Integer);
    }
}
