//! Registry: unique names, late binding, builtins

use crate::common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_forward_reference_resolves_exactly_once() {
    let mut types = TypeRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let resolved = Arc::new(Mutex::new(Vec::new()));

    let calls_in = Arc::clone(&calls);
    let resolved_in = Arc::clone(&resolved);
    types.register_callback("Foo", move |ty| {
        calls_in.fetch_add(1, Ordering::SeqCst);
        resolved_in.lock().unwrap().push(ty.storage_type);
    });

    types.define("Foo", TypeDescriptor::of::<ByteSize>()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*resolved.lock().unwrap(), vec![StorageType::UnsignedInteger]);

    let second = types.define("Foo", TypeDescriptor::of::<ByteSize>());
    assert_eq!(second, Err(Error::AlreadyDefined("Foo".to_string())));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_callback_receives_captured_arguments() {
    let mut types = TypeRegistry::new();
    let out = Arc::new(Mutex::new(String::new()));
    let out_in = Arc::clone(&out);
    let prefix = String::from("resolved:");
    types.register_callback("Later", move |ty| {
        *out_in.lock().unwrap() = format!("{}{}", prefix, ty.name);
    });
    types.define("Later", TypeDescriptor::of::<Urn>()).unwrap();
    assert_eq!(*out.lock().unwrap(), "resolved:RDFURN");
}

#[test]
fn test_global_late_binding() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    registry::register_callback("IntegrationLateBound", move |_| {
        calls_in.fetch_add(1, Ordering::SeqCst);
    });
    assert!(registry::lookup("IntegrationLateBound").is_err());

    registry::define("IntegrationLateBound", TypeDescriptor::of::<RdfInteger>()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(registry::define("IntegrationLateBound", TypeDescriptor::of::<RdfInteger>()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_global_builtins_parse_by_name() {
    let cases: [(&str, &[u8], &str); 6] = [
        ("RDFInteger", b"-12", "-12"),
        ("Duration", b"90", "90s"),
        ("ByteSize", b"1.5Gb", "1.5Gb"),
        ("RDFURN", b"aff4:/a//b", "aff4:/a/b"),
        ("SessionID", b"aff4:/flows/W:1", "aff4:/flows/W:1"),
        ("FlowSessionID", b"W:2", "aff4:/flows/W:2"),
    ];
    for (name, wire, shown) in cases {
        let value = registry::parse_by_name(name, wire).unwrap();
        assert_eq!(value.type_name(), name);
        assert_eq!(value.to_string(), shown, "{}", name);
    }
}

#[test]
fn test_lookup_unknown_is_not_found() {
    assert!(matches!(
        registry::lookup("NoSuchType"),
        Err(Error::NotFound(name)) if name == "NoSuchType"
    ));
}

#[test]
fn test_descriptor_reports_storage_type() {
    let types = TypeRegistry::with_builtins();
    let expected = [
        ("RDFBytes", StorageType::Bytes),
        ("RDFString", StorageType::String),
        ("RDFInteger", StorageType::Integer),
        ("RDFBool", StorageType::UnsignedInteger),
        ("RDFDatetime", StorageType::UnsignedInteger),
        ("Duration", StorageType::Integer),
        ("ByteSize", StorageType::UnsignedInteger),
        ("RDFURN", StorageType::String),
    ];
    for (name, storage) in expected {
        assert_eq!(types.lookup(name).unwrap().storage_type, storage, "{}", name);
    }
}

#[test]
fn test_sealed_registry_rejects_definitions() {
    let mut types = TypeRegistry::with_builtins();
    types.seal();
    assert!(matches!(
        types.define_type::<RdfString>(),
        Err(Error::RegistrySealed(_))
    ));
    assert!(types.lookup("RDFString").is_ok());
}
