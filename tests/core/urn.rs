//! URN: normalized paths and path algebra

use crate::common::*;
use proptest::prelude::*;

#[test]
fn test_add_joins_and_normalizes() {
    assert_eq!(
        Urn::new("aff4:/C.1000/fs/os").add("foo"),
        Urn::new("aff4:/C.1000/fs/os/foo")
    );
}

#[test]
fn test_split_with_count() {
    assert_eq!(Urn::new("aff4:/a/b/c").split(Some(2)), vec!["a", "b/c"]);
    let parts = Urn::new("aff4:/a").split(Some(3));
    assert_eq!(parts, vec!["a", "", ""]);
}

#[test]
fn test_relative_name_remainder_or_none() {
    let urn = Urn::new("aff4:/C.1000/vfs/fs/os");
    assert_eq!(
        urn.relative_name(&Urn::new("aff4:/C.1000/vfs")),
        Some("fs/os".to_string())
    );
    assert_eq!(urn.relative_name(&Urn::new("aff4:/C.2000")), None);
}

#[test]
fn test_equality_ignores_spelling_and_age() {
    let a = Urn::new("aff4:/a/./b//c/");
    let b = Urn::new("aff4:/a/b/x/../c").copy_with_age(12u64);
    assert_eq!(a, b);
    assert_eq!(a.wire_hash(), b.wire_hash());
}

#[test]
fn test_subject_is_a_urn() {
    let subject = Subject::new("aff4:/C.1/fs");
    assert_eq!(subject.as_urn().basename(), "fs");
    assert_eq!(subject.to_string(), "aff4:/C.1/fs");
    assert_eq!(Subject::TYPE_NAME, "Subject");
}

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(path in messy_path()) {
        let once = Urn::new(&path);
        let twice = Urn::new(once.to_string());
        prop_assert_eq!(once.path(), twice.path());
        prop_assert!(once.path().starts_with('/'));
        prop_assert!(!once.path().contains("//"));
        prop_assert!(once.path() == "/" || !once.path().ends_with('/'));
    }

    #[test]
    fn prop_add_appends_segment(base in messy_path(), seg in segment()) {
        let parent = Urn::new(&base);
        let child = parent.add(&seg);
        prop_assert_eq!(child.basename(), seg.as_str());
        prop_assert_eq!(child.dirname(), parent.path());
        prop_assert_eq!(child.parent(), parent);
    }

    #[test]
    fn prop_split_count_is_exact(path in messy_path(), n in 1usize..6) {
        let parts = Urn::new(&path).split(Some(n));
        prop_assert_eq!(parts.len(), n);
    }
}
