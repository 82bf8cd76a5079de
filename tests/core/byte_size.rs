//! ByteSize: prefix parsing and canonical display

use crate::common::*;
use proptest::prelude::*;

#[test]
fn test_documented_values() {
    assert_eq!(ByteSize::from_string("1.5Gb").unwrap().bytes(), 1_610_612_736);
    assert_eq!(ByteSize::new(1_610_612_736).to_string(), "1.5Gb");
    assert_eq!(ByteSize::new(512).to_string(), "512b");
}

#[test]
fn test_si_and_binary_prefixes() {
    assert_eq!(ByteSize::from_string("1k").unwrap().bytes(), 1000);
    assert_eq!(ByteSize::from_string("1ki").unwrap().bytes(), 1024);
    assert_eq!(ByteSize::from_string("1MiB").unwrap().bytes(), 1_048_576);
    assert_eq!(ByteSize::from_string("1g").unwrap().bytes(), 1_000_000_000);
}

#[test]
fn test_unrecognized_unit() {
    assert!(ByteSize::from_string("5pb").unwrap_err().is_decode());
    assert!(ByteSize::from_string("-5k").unwrap_err().is_decode());
}

#[test]
fn test_registry_parses_exact_wire_form() {
    let size = ByteSize::new(1_610_612_737);
    let parsed = registry::parse_by_name("ByteSize", &size.serialize_to_wire()).unwrap();
    assert_eq!(parsed.downcast_ref::<ByteSize>(), Some(&size));
}

proptest! {
    #[test]
    fn prop_wire_round_trip(bytes in any::<u64>()) {
        let size = ByteSize::new(bytes);
        prop_assert_eq!(ByteSize::parse_from(&size.serialize_to_wire()).unwrap(), size);
    }

    #[test]
    fn prop_display_is_within_a_tenth_of_a_unit(bytes in 0u64..(1u64 << 40)) {
        let shown = ByteSize::new(bytes).to_string();
        let reparsed = ByteSize::from_string(&shown).unwrap().bytes();
        let divisor = if bytes > 1 << 30 {
            1u64 << 30
        } else if bytes > 1 << 20 {
            1 << 20
        } else if bytes > 1 << 10 {
            1 << 10
        } else {
            1
        };
        let diff = reparsed.abs_diff(bytes);
        prop_assert!(diff <= divisor / 10 + 1, "{} -> {} -> {}", bytes, shown, reparsed);
    }
}
