//! Label set semantics: subset matching and content ordering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promtext_core::LabelSet;

#[test]
fn empty_set_is_subset_of_everything() {
    let empty = LabelSet::new();
    let full = LabelSet::new().with("a", "1").with("b", "2");
    assert!(empty.is_subset_of(&full));
    assert!(empty.is_subset_of(&empty));
}

#[test]
fn subset_requires_matching_values() {
    let partial = LabelSet::new().with("a", "1");
    let matching = LabelSet::new().with("a", "1").with("b", "2");
    let wrong_value = LabelSet::new().with("a", "9").with("b", "2");
    let missing_key = LabelSet::new().with("b", "2");

    assert!(partial.is_subset_of(&matching));
    assert!(!partial.is_subset_of(&wrong_value));
    assert!(!partial.is_subset_of(&missing_key));
}

#[test]
fn superset_is_not_subset() {
    let partial = LabelSet::new().with("a", "1");
    let full = LabelSet::new().with("a", "1").with("b", "2");
    assert!(!full.is_subset_of(&partial));
}

#[test]
fn ordering_is_by_content_not_insertion() {
    let ab = LabelSet::new().with("b", "2").with("a", "1");
    let ba = LabelSet::new().with("a", "1").with("b", "2");
    assert_eq!(ab, ba);

    let keys: Vec<&str> = ab.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[test]
fn from_pairs_keeps_last_duplicate() {
    let set = LabelSet::from_pairs([("a", "1"), ("a", "2")]);
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("a"), Some("2"));
}
