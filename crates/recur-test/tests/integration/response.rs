//! Wire form of request outcomes.

use recur_test::rfc::rfc::rrule::expand::ExpansionLimits;
use recur_test::service::occurrence::{OccurrenceResponse, occurrences_between};

fn respond(rule: &str, after: &str, before: &str, limits: &ExpansionLimits) -> serde_json::Value {
    let response = OccurrenceResponse::from(occurrences_between(rule, after, before, limits));
    let json = response
        .to_json()
        .unwrap_or_else(|e| panic!("response did not serialize: {e}"));
    serde_json::from_str(&json).unwrap_or_else(|e| panic!("invalid JSON {json:?}: {e}"))
}

#[test_log::test]
fn success_has_only_occurrences() {
    let value = respond(
        "FREQ=DAILY",
        "2024-01-01",
        "2024-01-03",
        &ExpansionLimits::default(),
    );
    assert_eq!(
        value,
        serde_json::json!({ "occurrences": ["2024-01-01", "2024-01-02"] })
    );
}

#[test_log::test]
fn empty_success_is_an_empty_list() {
    let value = respond(
        "DTSTART:2024-01-01\nRRULE:FREQ=DAILY;COUNT=2",
        "2024-05-01",
        "2024-06-01",
        &ExpansionLimits::default(),
    );
    assert_eq!(value, serde_json::json!({ "occurrences": [] }));
}

#[test_log::test]
fn failure_has_only_error() {
    let value = respond(
        "FREQ=WEEKLY;COUNT=3;UNTIL=2024-01-01",
        "2024-01-01",
        "2024-02-01",
        &ExpansionLimits::default(),
    );
    let object = value.as_object().unwrap_or_else(|| panic!("not an object: {value}"));
    assert_eq!(object.len(), 1);
    assert!(
        object["error"]
            .as_str()
            .is_some_and(|message| message.contains("COUNT"))
    );
}

#[test_log::test]
fn capped_result_is_flagged() {
    let limits = ExpansionLimits {
        max_occurrences: Some(3),
        ..ExpansionLimits::default()
    };
    let value = respond("FREQ=HOURLY", "2024-01-01", "2024-01-02", &limits);
    assert_eq!(
        value,
        serde_json::json!({
            "occurrences": ["2024-01-01", "2024-01-01T01:00:00", "2024-01-01T02:00:00"],
            "limited": true,
        })
    );
}
