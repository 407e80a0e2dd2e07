//! Text and HTML reports produced at the end of a run.

use super::test_utils::Harness;

#[test]
fn test_text_report() {
    let mut h = Harness::new();
    h.run(&[
        "s1:7",
        "5",
        "s1~SUB01",
        "s002~SUB002",
        "s2:e10",
        "s3:4",
        "s3:113-124,139-145,152-155",
        "s3:s123-126",
    ]);
    h.assert_files(&[
        "@_-1--2--3--4-[5]",
        "@_s01~SUB01",
        "@_s02~SUB002",
        "@_s03_-001--002--003-[004]-005--006--007--008--009--010--011--012--013--014--015--016--017--018--019--020-",
        "@_s03_-101--102--103--104--105--106--107--108--109--110--111--112-[113][114][115][116][117][118][119][120]",
        "@_s03_[121][122]$123$$124$!125!!126!-127--128--129--130--131--132--133--134--135--136--137--138-[139][140]",
        "@_s03_[141][142][143][144][145]-146--147--148--149--150--151-[152][153][154][155]",
    ]);
    assert!(h.out().is_empty());

    h.run(&["text"]);
    assert_eq!(
        h.out(),
        [
            " 1   2   3   4  [5]",
            "",
            "s01 (SUB01):",
            " 1   2   3   4   5   6  [7]",
            "",
            "s02 (SUB002):",
            " 01   02   03   04   05   06   07   08   09   10  ++",
            "",
            "s03:",
            " 001   002   003  [004]  005   006   007   008   009   010   011   012   013   014   015   016   017   018   019   020 ",
            " 021   022   023   024   025   026   027   028   029   030   031   032   033   034   035   036   037   038   039   040 ",
            " 041   042   043   044   045   046   047   048   049   050   051   052   053   054   055   056   057   058   059   060 ",
            " 061   062   063   064   065   066   067   068   069   070   071   072   073   074   075   076   077   078   079   080 ",
            " 081   082   083   084   085   086   087   088   089   090   091   092   093   094   095   096   097   098   099   100 ",
            " 101   102   103   104   105   106   107   108   109   110   111   112  [113] [114] [115] [116] [117] [118] [119] [120]",
            "[121] [122] $123$ $124$ !125! !126!  127   128   129   130   131   132   133   134   135   136   137   138  [139] [140]",
            "[141] [142] [143] [144] [145]  146   147   148   149   150   151  [152] [153] [154] [155]",
            "",
        ]
    );
}

#[test]
fn test_text_report_complete_marker() {
    let mut h = Harness::new();
    h.run(&["1-3", "e", "text"]);
    assert_eq!(h.out(), ["[1] [2] [3] ##", ""]);
}

#[test]
fn test_html_report_lifecycle() {
    let mut h = Harness::new();
    h.run(&["2"]);
    assert!(h.fs().contents("serie.html").is_none());

    h.run(&["html"]);
    let html = h.fs().contents("serie.html").unwrap();
    assert!(html.contains("<td class=\"ungot unseen\">1</td>"));
    assert!(html.contains("<td class=\"got unseen\">2</td>"));

    // Refreshed on later runs without asking, and never taken for a sentinel.
    h.run(&["s2"]);
    let html = h.fs().contents("serie.html").unwrap();
    assert!(html.contains("<td class=\"got seen\">2</td>"));
    h.assert_files(&["@_-1-$2$", "serie.html"]);
}

#[test]
fn test_html_report_marks_declared_end() {
    let mut h = Harness::new();
    h.run(&["show:e3", "html"]);
    let html = h.fs().contents("serie.html").unwrap();
    assert!(html.contains("<table class=\"complete\">"));
    assert!(html.contains(">show</td>"));
}
