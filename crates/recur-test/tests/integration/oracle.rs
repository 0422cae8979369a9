//! Differential tests against the `rrule` crate.

use recur_test::oracle::reference_occurrences;

use crate::helpers::{instants, ts};

/// COUNT-bounded rules whose DTSTART is itself an occurrence, so both
/// implementations agree on where the sequence begins.
const ORACLE_CASES: &[(&str, &str)] = &[
    ("1997-09-02T09:00:00", "FREQ=DAILY;COUNT=10"),
    ("1997-09-02T09:00:00", "FREQ=DAILY;INTERVAL=10;COUNT=5"),
    ("1997-09-02T09:00:00", "FREQ=WEEKLY;INTERVAL=2;COUNT=8;WKST=SU;BYDAY=TU,TH"),
    ("1997-09-05T09:00:00", "FREQ=MONTHLY;COUNT=10;BYDAY=1FR"),
    ("1997-09-22T09:00:00", "FREQ=MONTHLY;COUNT=6;BYDAY=-2MO"),
    ("1997-09-28T09:00:00", "FREQ=MONTHLY;COUNT=6;BYMONTHDAY=-3"),
    ("1997-09-02T09:00:00", "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=2,15"),
    ("1997-06-10T09:00:00", "FREQ=YEARLY;COUNT=10;BYMONTH=6,7"),
    ("1997-01-01T09:00:00", "FREQ=YEARLY;INTERVAL=3;COUNT=10;BYYEARDAY=1,100,200"),
    ("1997-09-04T09:00:00", "FREQ=MONTHLY;COUNT=3;BYDAY=TU,WE,TH;BYSETPOS=3"),
    ("1997-09-29T09:00:00", "FREQ=MONTHLY;COUNT=7;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2"),
    ("1997-09-02T09:00:00", "FREQ=HOURLY;INTERVAL=3;COUNT=20"),
    ("1997-09-02T09:00:00", "FREQ=MINUTELY;INTERVAL=15;COUNT=6"),
    ("1998-01-05T09:00:00", "FREQ=DAILY;COUNT=20;BYMONTH=1;BYDAY=MO,WE"),
    ("1998-01-25T09:00:00", "FREQ=YEARLY;COUNT=5;BYMONTH=1;BYDAY=-1SU"),
    ("1997-11-27T09:00:00", "FREQ=YEARLY;COUNT=5;BYMONTH=11;BYDAY=4TH"),
    ("2024-01-31T00:00:00", "FREQ=MONTHLY;COUNT=12;BYMONTHDAY=31"),
    ("2024-02-29T00:00:00", "FREQ=YEARLY;COUNT=4"),
    ("2024-01-01T09:00:00", "FREQ=DAILY;COUNT=12;BYHOUR=9,17;BYMINUTE=0,30"),
    ("2024-01-01T09:00:00", "FREQ=WEEKLY;COUNT=10;BYDAY=MO,FR;BYHOUR=9,18"),
];

#[test_log::test]
fn matches_reference_expansion() {
    for &(dtstart, body) in ORACLE_CASES {
        let rule = format!("DTSTART:{dtstart}\nRRULE:{body}");
        let expected = reference_occurrences(ts(dtstart), body, 500)
            .unwrap_or_else(|e| panic!("reference rejected {body}: {e}"));
        let actual = instants(&rule, dtstart, "2200-01-01");

        assert_eq!(actual, expected, "Case {body} from {dtstart} did not match");
    }
}

#[test_log::test]
fn matches_reference_inside_a_window() {
    // COUNT is positional from DTSTART, so a later window sees the tail only.
    let dtstart = "1997-09-02T09:00:00";
    let body = "FREQ=WEEKLY;COUNT=10;BYDAY=TU,TH";
    let after = ts("1997-09-20");
    let before = ts("1997-10-01");

    let expected: Vec<_> = reference_occurrences(ts(dtstart), body, 500)
        .unwrap_or_else(|e| panic!("reference rejected {body}: {e}"))
        .into_iter()
        .filter(|t| after <= *t && *t < before)
        .collect();
    let actual = instants(
        &format!("DTSTART:{dtstart}\nRRULE:{body}"),
        "1997-09-20",
        "1997-10-01",
    );

    assert!(!actual.is_empty());
    assert_eq!(actual, expected);
}
