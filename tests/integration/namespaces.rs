//! Named namespaces alongside the root one.

use super::test_utils::Harness;
use serie::SerieError;

#[test]
fn test_namespace_basic() {
    let mut h = Harness::new();
    h.run(&["name:7"]);
    h.assert_files(&["@_name_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_underscore_separates_namespace_too() {
    let mut h = Harness::new();
    h.run(&["name_7"]);
    h.assert_files(&["@_name_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_namespace_numeral_is_padded() {
    let mut h = Harness::new();
    h.run(&["name3:7"]);
    h.assert_files(&["@_name03_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_mix_namespaces() {
    let mut h = Harness::new();
    h.run(&["name3:7", "name001:5"]);
    h.assert_files(&["@_name01_-1--2--3--4-[5]", "@_name03_-1--2--3--4--5--6-[7]"]);
    h.run(&["name3:2-4", "name1:s3-6", "23"]);
    h.assert_files(&[
        "@_-21--22-[23]",
        "@_name01_-1--2-!3!!4!$5$!6!",
        "@_name03_-1-[2][3][4]-5--6-[7]",
    ]);
}

#[test]
fn test_mix_namespaces_with_comma() {
    let mut h = Harness::new();
    h.run(&["name3:7", "name001:5"]);
    h.run(&["name3:2,4", "name1:s3,6", "23"]);
    h.assert_files(&[
        "@_-21--22-[23]",
        "@_name01_-1--2-!3!-4-[5]!6!",
        "@_name03_-1-[2]-3-[4]-5--6-[7]",
    ]);
}

#[test]
fn test_nested_namespace_names() {
    let mut h = Harness::new();
    h.run(&["show:s01:3", "show:e2"]);
    h.assert_files(&["@_show_-1--2-+", "@_show_s01_-1--2-[3]"]);
    h.run(&["show:1-2"]);
    h.assert_files(&["@_show_[1][2]#", "@_show_s01_-1--2-[3]"]);
}

#[test]
fn test_bad_selector_is_reported_and_skipped() {
    let mut h = Harness::new();
    h.run(&["1,x,4"]);
    h.assert_files(&["@_[1]-2--3-[4]"]);
    assert_eq!(h.err(), ["Can't understand [x]"]);
}

#[test]
fn test_bad_end_is_reported() {
    let mut h = Harness::new();
    h.run(&["e0", "eleven", "2"]);
    h.assert_files(&["@_-1-[2]"]);
    assert_eq!(h.err(), ["Can't understand [e0]", "Can't understand [eleven]"]);
}

#[test]
fn test_invalid_namespace_aborts_before_any_change() {
    let mut h = Harness::with_files(&["@_[1]"]);
    let err = h.try_run(&["2", "9lives:3"]).unwrap_err();
    assert!(matches!(err, SerieError::NamespaceName { .. }));
    h.assert_files(&["@_[1]"]);
}

#[test]
fn test_trailing_separator_is_fatal() {
    let mut h = Harness::new();
    assert!(h.try_run(&["show_:3"]).is_err());
    h.assert_files(&[]);
}

#[test]
fn test_sentinel_with_unusable_namespace_is_left_alone() {
    let mut h = Harness::with_files(&["@_a\\b_[1]", "@_[2]"]);
    let summary = h.run(&["3"]);
    assert_eq!((summary.created, summary.deleted), (1, 1));
    h.assert_files(&["@_-1-[2][3]", "@_a\\b_[1]"]);
}
