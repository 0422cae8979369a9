//! Properties that hold for every rule and window.

use recur_test::rfc::rfc::rrule::build::format_timestamp;
use recur_test::rfc::rfc::rrule::parse::parse_timestamp;

use crate::helpers::{instants, occurrences, ts};

const RULES: &[&str] = &[
    "FREQ=DAILY",
    "FREQ=DAILY;INTERVAL=3;BYHOUR=6,18",
    "FREQ=WEEKLY;BYDAY=MO,WE,FR",
    "FREQ=WEEKLY;INTERVAL=2;WKST=SU;BYDAY=TU,SU",
    "FREQ=MONTHLY;BYDAY=-1FR",
    "FREQ=MONTHLY;BYMONTHDAY=1,-1",
    "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=1,-1",
    "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29",
    "FREQ=YEARLY;BYYEARDAY=-1",
    "FREQ=HOURLY;INTERVAL=7",
    "FREQ=MINUTELY;INTERVAL=90;BYHOUR=8,9,10",
    "DTSTART:2023-12-31T23:59:59\nRRULE:FREQ=SECONDLY;INTERVAL=3601;COUNT=200",
    "DTSTART:2020-03-15T08:00:00\nRRULE:FREQ=WEEKLY;COUNT=100;BYDAY=SA,SU",
    "DTSTART:2020-01-01\nRRULE:FREQ=DAILY;UNTIL=2024-02-10T12:00:00",
];

const WINDOWS: &[(&str, &str)] = &[
    ("2024-01-01", "2024-03-01"),
    ("2024-02-28T12:00:00", "2024-03-02"),
    ("2023-12-31T23:00:00", "2024-01-01T01:00:00"),
];

#[test_log::test]
fn strictly_increasing_and_inside_window() {
    for rule in RULES {
        for &(after, before) in WINDOWS {
            let found = instants(rule, after, before);
            let (after, before) = (ts(after), ts(before));

            assert!(
                found.windows(2).all(|pair| pair[0] < pair[1]),
                "{rule:?} is not strictly increasing: {found:?}"
            );
            assert!(
                found.iter().all(|t| after <= *t && *t < before),
                "{rule:?} left [{after}, {before}): {found:?}"
            );
        }
    }
}

#[test_log::test]
fn rendered_occurrences_round_trip() {
    for rule in RULES {
        for &(after, before) in WINDOWS {
            for rendered in occurrences(rule, after, before) {
                let parsed = parse_timestamp(&rendered)
                    .unwrap_or_else(|e| panic!("{rendered:?} does not parse: {e}"));
                assert_eq!(format_timestamp(parsed), rendered);
            }
        }
    }
}

#[test_log::test]
fn repeated_requests_agree() {
    for rule in RULES {
        let first = occurrences(rule, "2024-01-01", "2024-03-01");
        let second = occurrences(rule, "2024-01-01", "2024-03-01");
        assert_eq!(first, second, "{rule:?} is not deterministic");
    }
}

#[test_log::test]
fn field_order_does_not_matter() {
    let forward = occurrences(
        "FREQ=MONTHLY;INTERVAL=2;BYDAY=TU,TH;BYSETPOS=2",
        "2024-01-01",
        "2025-01-01",
    );
    let shuffled = occurrences(
        "BYSETPOS=2;byday=th,tu;INTERVAL=2;freq=monthly",
        "2024-01-01",
        "2025-01-01",
    );
    assert!(!forward.is_empty());
    assert_eq!(forward, shuffled);
}

#[test_log::test]
fn adjacent_windows_partition_the_sequence() {
    // Anchored rules only: without DTSTART each window anchors at its own start.
    let anchored = RULES.iter().filter(|rule| rule.starts_with("DTSTART"));
    for rule in anchored {
        let whole = instants(rule, "2024-01-01", "2024-03-01");
        let mut parts = instants(rule, "2024-01-01", "2024-01-20T10:30:00");
        parts.extend(instants(rule, "2024-01-20T10:30:00", "2024-03-01"));
        assert_eq!(whole, parts, "{rule:?} does not split cleanly");
    }
}

#[test_log::test]
fn count_is_positional_from_anchor() {
    let rule = "DTSTART:2024-01-01\nRRULE:FREQ=DAILY;COUNT=10";
    let all = instants(rule, "2024-01-01", "2025-01-01");
    assert_eq!(all.len(), 10);

    let tail = instants(rule, "2024-01-08", "2025-01-01");
    assert_eq!(tail, all[7..]);

    assert!(instants(rule, "2024-01-11", "2025-01-01").is_empty());
}
