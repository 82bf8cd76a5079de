//! Envelopes resolved through name-based lookup

use crate::common::*;

#[test]
fn test_envelope_survives_bytes() {
    let mut urn = Urn::new("aff4:/C.1000/fs/os/etc");
    urn.set_age(RdfDatetime::from_secs(1_000));

    let bytes = EmbeddedValue::wrap(&urn).to_bytes().unwrap();
    let envelope = EmbeddedValue::from_bytes(&bytes).unwrap();
    assert_eq!(envelope.name, "RDFURN");

    let restored = envelope.unwrap(&TypeRegistry::with_builtins()).unwrap();
    assert_eq!(restored.downcast_ref::<Urn>(), Some(&urn));
    assert_eq!(restored.current_age(), RdfDatetime::from_secs(1_000));
}

#[test]
fn test_every_builtin_wraps() {
    let registry = TypeRegistry::with_builtins();
    let values: Vec<Box<dyn AnyValue>> = vec![
        Box::new(RdfBytes::new(vec![0, 255])),
        Box::new(RdfString::new("hello")),
        Box::new(RdfInteger::new(-7)),
        Box::new(RdfBool::new(true)),
        Box::new(HashDigest::new(vec![0xab; 4])),
        Box::new(RdfDatetime::from_secs(5)),
        Box::new(RdfDatetimeSeconds::from_secs(5)),
        Box::new(Duration::from_secs(90)),
        Box::new(ByteSize::new(4096)),
        Box::new(Urn::new("aff4:/a/b")),
        Box::new(Subject::new("aff4:/a")),
        Box::new(SessionId::from_string("aff4:/flows/F:1").unwrap()),
    ];
    for value in values {
        let envelope = EmbeddedValue::wrap_dynamic(value.as_ref());
        let restored = envelope.unwrap(&registry).unwrap();
        assert_eq!(restored.type_name(), value.type_name());
        assert_eq!(restored.to_wire(), value.to_wire(), "{}", value.type_name());
    }
}

#[test]
fn test_typed_unwrap_rejects_other_types() {
    let envelope = EmbeddedValue::wrap(&RdfInteger::new(1));
    assert!(envelope.unwrap_as::<RdfString>().is_err());
    assert_eq!(envelope.unwrap_as::<RdfInteger>().unwrap(), RdfInteger::new(1));
}
