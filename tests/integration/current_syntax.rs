//! Runs on trees using the `@_` syntax, including brand-new trees.

use super::test_utils::Harness;

#[test]
fn test_basic() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.assert_files(&["@_-1--2--3--4--5--6-[7]"]);
}

#[test]
fn test_end_declaration() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["e9"]);
    h.assert_files(&["@_-1--2--3--4--5--6-[7]-8--9-+"]);
}

#[test]
fn test_end_at_highest_completes() {
    let mut h = Harness::new();
    h.run(&["1-3"]);
    h.run(&["e"]);
    h.assert_files(&["@_[1][2][3]#"]);
}

#[test]
fn test_end_on_empty_namespace_is_harmless() {
    let mut h = Harness::new();
    h.run(&["e"]);
    h.assert_files(&[]);
    assert!(h.err().is_empty());
}

#[test]
fn test_width_and_split() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["11"]);
    h.assert_files(&["@_-01--02--03--04--05--06-[07]-08--09--10-[11]"]);
    h.run(&["31"]);
    h.assert_files(&[
        "@_-01--02--03--04--05--06-[07]-08--09--10-[11]-12--13--14--15--16--17--18--19--20-",
        "@_-21--22--23--24--25--26--27--28--29--30-[31]",
    ]);
}

#[test]
fn test_empty_row() {
    let mut h = Harness::new();
    h.run(&["7", "51"]);
    h.assert_files(&[
        "@_-01--02--03--04--05--06-[07]-08--09--10--11--12--13--14--15--16--17--18--19--20-",
        "@_-41--42--43--44--45--46--47--48--49--50-[51]",
    ]);
}

#[test]
fn test_clearing_beyond_highest_extends_length() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["-9"]);
    h.assert_files(&["@_-1--2--3--4--5--6-[7]-8--9-"]);
}

#[test]
fn test_intervals() {
    let mut h = Harness::new();
    h.run(&["3-7"]);
    h.assert_files(&["@_-1--2-[3][4][5][6][7]"]);

    let mut h = Harness::new();
    h.run(&["9"]);
    h.run(&["3-7"]);
    h.assert_files(&["@_-1--2-[3][4][5][6][7]-8-[9]"]);

    let mut h = Harness::new();
    h.run(&["9"]);
    h.run(&["2-5", "4-7"]);
    h.assert_files(&["@_-1-[2][3][4][5][6][7]-8-[9]"]);
}

#[test]
fn test_reversed_interval() {
    let mut h = Harness::new();
    h.run(&["5-3"]);
    h.assert_files(&["@_-1--2-[3][4][5]"]);
}

#[test]
fn test_suppression() {
    let mut h = Harness::new();
    h.run(&["9"]);
    h.run(&["7"]);
    h.assert_files(&["@_-1--2--3--4--5--6-[7]-8-[9]"]);
    h.run(&["-7"]);
    h.assert_files(&["@_-1--2--3--4--5--6--7--8-[9]"]);
}

#[test]
fn test_suppression_with_end() {
    let mut h = Harness::new();
    h.run(&["e7", "-7"]);
    h.assert_files(&["@_-1--2--3--4--5--6--7-+"]);
}

#[test]
fn test_suppression_on_empty() {
    let mut h = Harness::new();
    h.run(&["-7"]);
    h.assert_files(&["@_-1--2--3--4--5--6--7-"]);
}

#[test]
fn test_seen() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["4"]);
    h.assert_files(&["@_-1--2--3-[4]-5--6-[7]"]);
    h.run(&["s4"]);
    h.assert_files(&["@_-1--2--3-$4$-5--6-[7]"]);
}

#[test]
fn test_seen_interval() {
    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["1-5"]);
    h.assert_files(&["@_[1][2][3][4][5]-6-[7]"]);
    h.run(&["s2-4"]);
    h.assert_files(&["@_[1]$2$$3$$4$[5]-6-[7]"]);

    let mut h = Harness::new();
    h.run(&["7"]);
    h.run(&["1-4"]);
    h.run(&["s2-5"]);
    h.assert_files(&["@_[1]$2$$3$$4$!5!-6-[7]"]);
}

#[test]
fn test_unseen_and_combined_flags() {
    let mut h = Harness::new();
    h.run(&["+s1-2"]);
    h.assert_files(&["@_$1$$2$"]);
    h.run(&["u2"]);
    h.assert_files(&["@_$1$[2]"]);
    h.run(&["-u1"]);
    h.assert_files(&["@_-1-[2]"]);
}

#[test]
fn test_comma_lists() {
    let mut h = Harness::new();
    h.run(&["1,4,7"]);
    h.assert_files(&["@_[1]-2--3-[4]-5--6-[7]"]);

    let mut h = Harness::new();
    h.run(&["1,4-6,8"]);
    h.assert_files(&["@_[1]-2--3-[4][5][6]-7-[8]"]);

    let mut h = Harness::new();
    h.run(&["1,4-6,8", "s3-4,6-8"]);
    h.assert_files(&["@_[1]-2-!3!$4$[5]$6$!7!$8$"]);
}

#[test]
fn test_comma_intervals_across_chunks() {
    let mut h = Harness::new();
    h.run(&["113-124,139-145,152-155"]);
    h.assert_files(&[
        "@_-101--102--103--104--105--106--107--108--109--110--111--112-[113][114][115][116][117][118][119][120]",
        "@_[121][122][123][124]-125--126--127--128--129--130--131--132--133--134--135--136--137--138-[139][140]",
        "@_[141][142][143][144][145]-146--147--148--149--150--151-[152][153][154][155]",
    ]);
}

#[test]
fn test_second_run_changes_nothing() {
    let mut h = Harness::new();
    h.run(&["1,4-6,8", "s3-4", "e12"]);
    let summary = h.run(&[]);
    assert_eq!(summary.created, 0);
    assert_eq!(summary.deleted, 0);
    assert_eq!(summary.kept, 1);
}

#[test]
fn test_non_empty_files_are_ignored() {
    let mut h = Harness::new();
    h.fs_mut().add_file("@_[3]", "notes");
    h.run(&["1"]);
    h.assert_files(&["@_[1]", "@_[3]"]);
    assert_eq!(h.fs().contents("@_[3]").as_deref(), Some("notes"));
}

#[test]
fn test_executable_bit_is_cleared_on_kept_sentinels() {
    let mut h = Harness::with_files(&["@_[1]"]);
    h.fs_mut().set_executable("@_[1]");
    h.run(&[]);
    assert!(!h.fs().is_executable("@_[1]"));
}
