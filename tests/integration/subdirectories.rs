//! Namespaces linked to subdirectories, and flattening them back.

use super::test_utils::Harness;
use serie::SerieError;
use std::path::Path;

#[test]
fn test_link_moves_items_into_subdir() {
    let mut h = Harness::new();
    h.run(&["s1:7"]);
    h.assert_files(&["@_s01_-1--2--3--4--5--6-[7]"]);
    h.run(&["s1~SUB01"]);
    h.assert_files(&["@_s01~SUB01"]);
    h.assert_files_in("SUB01", &["@_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_link_before_items() {
    let mut h = Harness::new();
    h.run(&["s1~SUB01"]);
    h.assert_files(&["@_s01~SUB01"]);
    h.run(&["s1:7"]);
    h.assert_files(&["@_s01~SUB01"]);
    h.assert_files_in("SUB01", &["@_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_multiple_links() {
    let mut h = Harness::new();
    h.run(&["s1:7", "5"]);
    h.assert_files(&["@_-1--2--3--4-[5]", "@_s01_-1--2--3--4--5--6-[7]"]);
    h.run(&["s1~SUB01"]);
    h.assert_files(&["@_-1--2--3--4-[5]", "@_s01~SUB01"]);
    h.run(&["s002~SUB002", "s2:e10", "s3:4"]);
    h.assert_files(&[
        "@_-1--2--3--4-[5]",
        "@_s01~SUB01",
        "@_s02~SUB002",
        "@_s03_-1--2--3-[4]",
    ]);
    h.assert_files_in("SUB01", &["@_-1--2--3--4--5--6-[7]"]);
    h.assert_files_in("SUB002", &["@_-01--02--03--04--05--06--07--08--09--10-+"]);
}

fn linked_tree() -> Harness {
    let mut h = Harness::new();
    h.run(&["s1:7", "5", "s1~SUB01", "s002~SUB002", "s2:e10", "s3:4"]);
    h.assert_files(&[
        "@_-1--2--3--4-[5]",
        "@_s01~SUB01",
        "@_s02~SUB002",
        "@_s03_-1--2--3-[4]",
    ]);
    h
}

#[test]
fn test_flatten_short_and_long() {
    for token in ["f", "flatten"] {
        let mut h = linked_tree();
        h.run(&[token]);
        h.assert_files(&[
            "@_-1--2--3--4-[5]",
            "@_s01_-1--2--3--4--5--6-[7]",
            "@_s02_-01--02--03--04--05--06--07--08--09--10-+",
            "@_s03_-1--2--3-[4]",
        ]);
        h.assert_files_in("SUB01", &[]);
        h.assert_files_in("SUB002", &[]);
        assert!(h.fs().is_dir("SUB01"));
    }
}

#[test]
fn test_relink_moves_items() {
    let mut h = Harness::new();
    h.run(&["s1~SUB01", "s1:2"]);
    h.run(&["s1~OTHER"]);
    h.assert_files(&["@_s01~OTHER"]);
    h.assert_files_in("SUB01", &[]);
    h.assert_files_in("OTHER", &["@_-1-[2]"]);
}

#[test]
fn test_nested_links_round_trip() {
    let mut h = Harness::new();
    h.run(&["show~SHOW", "show_extra~EXTRA", "show_extra:3", "show_notes:1"]);
    h.assert_files(&["@_show~SHOW"]);
    h.assert_files_in("SHOW", &["@_extra~EXTRA", "@_notes_[1]"]);
    h.assert_files_in("SHOW/EXTRA", &["@_-1--2-[3]"]);

    let summary = h.run(&[]);
    assert_eq!((summary.created, summary.deleted), (0, 0));
    assert_eq!(summary.kept, 4);
}

#[test]
fn test_dangling_link_recreates_directory() {
    let mut h = Harness::with_files(&["@_s01~GONE"]);
    h.run(&["s1:2"]);
    assert!(h.fs().is_dir("GONE"));
    h.assert_files_in("GONE", &["@_-1-[2]"]);
}

#[test]
fn test_second_link_to_same_directory_is_refused() {
    let mut h = Harness::new();
    h.run(&["a~DIR", "b~DIR"]);
    h.assert_files(&["@_a~DIR"]);
    assert_eq!(h.err(), ["Directory [DIR] is already linked to [a]"]);
}

#[test]
fn test_root_cannot_be_linked() {
    let mut h = Harness::new();
    let err = h.try_run(&["~DIR"]).unwrap_err();
    assert!(matches!(err, SerieError::NamespaceName { .. }));
    h.assert_files(&[]);
}

#[test]
fn test_linking_parent_after_child() {
    let mut h = Harness::new();
    h.run(&["a_b~B", "a_b:3"]);
    h.assert_files(&["@_a_b~B"]);
    h.assert_files_in("B", &["@_-1--2-[3]"]);

    h.run(&["a~A"]);
    h.assert_files(&["@_a~A"]);
    h.assert_files_in("A", &["@_b~B"]);
    h.assert_files_in("A/B", &["@_-1--2-[3]"]);
    h.assert_files_in("B", &[]);

    let summary = h.run(&["text"]);
    assert_eq!((summary.created, summary.deleted), (0, 0));
    let header = format!("a_b ({}):", Path::new("A").join("B").display());
    assert!(h.out().contains(&header), "{:?}", h.out());
    assert!(h.out().iter().any(|line| line.ends_with("[3]")));
}

#[test]
fn test_linking_parent_after_child_in_one_run() {
    let mut h = Harness::new();
    h.run(&["a_b~B", "a_b:3", "a~A"]);
    h.assert_files(&["@_a~A"]);
    h.assert_files_in("A", &["@_b~B"]);
    h.assert_files_in("A/B", &["@_-1--2-[3]"]);
    assert!(h.err().is_empty());
}

#[test]
fn test_link_outside_tree_is_refused() {
    let mut h = Harness::new();
    h.run(&["a~..", "a:3"]);
    h.assert_files(&["@_a_-1--2-[3]"]);
    assert_eq!(h.err(), ["Can't link [a] outside the tracked directory: [..]"]);
}

#[test]
fn test_link_file_leaving_tree_is_not_followed() {
    let mut h = Harness::with_files(&["@_a~..", "@_b~A_.._..", "@_[1]"]);
    let summary = h.run(&[]);
    assert_eq!((summary.created, summary.deleted, summary.kept), (0, 0, 1));
    h.assert_files(&["@_[1]", "@_a~..", "@_b~A_.._.."]);
}
