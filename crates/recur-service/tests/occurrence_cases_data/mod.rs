use recur_rfc::error::RfcError;
use recur_rfc::rfc::rrule::core::Bound;
use recur_rfc::rfc::rrule::expand::{ExpansionError, ExpansionLimits};
use recur_rfc::rfc::rrule::parse::{BoundError, RuleErrorKind};
use recur_service::error::ServiceError;
use recur_service::occurrence::occurrences_between;

pub enum Expected {
    Occurrences(&'static [&'static str]),
    Len(usize),
    Rule(RuleErrorKind),
    BoundParse(Bound),
    BoundOrder,
    Overflow,
}

pub struct OccurrenceCase {
    pub name: &'static str,
    pub rule: &'static str,
    pub after: &'static str,
    pub before: &'static str,
    pub expected: Expected,
}

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "daily_basic",
            rule: "FREQ=DAILY;INTERVAL=1",
            after: "2024-01-01",
            before: "2024-01-04",
            expected: Expected::Occurrences(&["2024-01-01", "2024-01-02", "2024-01-03"]),
        },
        OccurrenceCase {
            name: "monthly_second_tuesday",
            rule: "FREQ=MONTHLY;BYDAY=2TU",
            after: "2024-01-01",
            before: "2024-04-01",
            expected: Expected::Occurrences(&["2024-01-09", "2024-02-13", "2024-03-12"]),
        },
        OccurrenceCase {
            name: "count_exhausted_before_window",
            rule: "DTSTART:2024-01-01\nRRULE:FREQ=DAILY;COUNT=2",
            after: "2024-03-01",
            before: "2024-04-01",
            expected: Expected::Occurrences(&[]),
        },
        OccurrenceCase {
            name: "count_and_until",
            rule: "FREQ=WEEKLY;COUNT=3;UNTIL=2024-01-01",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::LimitConflict),
        },
        OccurrenceCase {
            name: "equal_bounds",
            rule: "FREQ=DAILY",
            after: "2024-01-01",
            before: "2024-01-01",
            expected: Expected::BoundOrder,
        },
        OccurrenceCase {
            name: "inverted_bounds",
            rule: "FREQ=DAILY",
            after: "2024-02-01",
            before: "2024-01-01",
            expected: Expected::BoundOrder,
        },
        OccurrenceCase {
            name: "monthly_31st",
            rule: "FREQ=MONTHLY;BYMONTHDAY=31",
            after: "2024-04-01",
            before: "2024-09-01",
            expected: Expected::Occurrences(&["2024-05-31", "2024-07-31", "2024-08-31"]),
        },
        OccurrenceCase {
            name: "fields_case_insensitive_and_reordered",
            rule: "byday=2tu;freq=monthly;",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Occurrences(&["2024-01-09"]),
        },
        OccurrenceCase {
            name: "missing_frequency",
            rule: "INTERVAL=2;COUNT=3",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::MissingFrequency),
        },
        OccurrenceCase {
            name: "duplicate_field",
            rule: "FREQ=DAILY;INTERVAL=2;INTERVAL=3",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::DuplicateField),
        },
        OccurrenceCase {
            name: "zero_ordinal",
            rule: "FREQ=MONTHLY;BYDAY=0MO",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::InvalidValue),
        },
        OccurrenceCase {
            name: "year_day_with_monthly",
            rule: "FREQ=MONTHLY;BYYEARDAY=100",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::InvalidValue),
        },
        OccurrenceCase {
            name: "month_day_with_weekly",
            rule: "FREQ=WEEKLY;BYMONTHDAY=15",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::InvalidValue),
        },
        OccurrenceCase {
            name: "unknown_field",
            rule: "FREQ=DAILY;BYWEEKDAY=MO",
            after: "2024-01-01",
            before: "2024-02-01",
            expected: Expected::Rule(RuleErrorKind::UnknownField),
        },
        OccurrenceCase {
            name: "malformed_before",
            rule: "FREQ=DAILY",
            after: "2024-01-01",
            before: "2024-13-01",
            expected: Expected::BoundParse(Bound::Before),
        },
        OccurrenceCase {
            name: "bound_with_offset_rejected",
            rule: "FREQ=DAILY",
            after: "2024-01-01T00:00:00Z",
            before: "2024-02-01",
            expected: Expected::BoundParse(Bound::After),
        },
        OccurrenceCase {
            name: "weekly_rfc_example",
            rule: "DTSTART:1997-09-02T09:00:00\nRRULE:FREQ=WEEKLY;UNTIL=1997-10-07T00:00:00;WKST=SU;BYDAY=TU,TH",
            after: "1997-01-01",
            before: "1998-01-01",
            expected: Expected::Len(10),
        },
        OccurrenceCase {
            name: "last_weekday_of_month",
            rule: "DTSTART:2024-01-01T17:00:00\nRRULE:FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
            after: "2024-01-01",
            before: "2024-07-01",
            expected: Expected::Occurrences(&[
                "2024-01-31T17:00:00",
                "2024-02-29T17:00:00",
                "2024-03-29T17:00:00",
                "2024-04-30T17:00:00",
                "2024-05-31T17:00:00",
                "2024-06-28T17:00:00",
            ]),
        },
        OccurrenceCase {
            name: "us_thanksgiving",
            rule: "FREQ=YEARLY;BYMONTH=11;BYDAY=4TH",
            after: "2024-01-01",
            before: "2027-01-01",
            expected: Expected::Occurrences(&["2024-11-28", "2025-11-27", "2026-11-26"]),
        },
        OccurrenceCase {
            name: "every_other_day_long_range",
            rule: "DTSTART:2000-01-01\nRRULE:FREQ=DAILY;INTERVAL=2",
            after: "2024-01-01",
            before: "2025-01-01",
            expected: Expected::Len(183),
        },
        OccurrenceCase {
            name: "rdate_and_exdate",
            rule: "DTSTART:2024-01-01\nRRULE:FREQ=WEEKLY\nRDATE:2024-01-10\nEXDATE:2024-01-15",
            after: "2024-01-01",
            before: "2024-01-31",
            expected: Expected::Occurrences(&[
                "2024-01-01",
                "2024-01-08",
                "2024-01-10",
                "2024-01-22",
                "2024-01-29",
            ]),
        },
        OccurrenceCase {
            name: "exrule_drops_weekends",
            rule: "DTSTART:2024-01-01\nRRULE:FREQ=DAILY\nEXRULE:FREQ=WEEKLY;BYDAY=SA,SU",
            after: "2024-01-01",
            before: "2024-01-10",
            expected: Expected::Occurrences(&[
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
                "2024-01-08",
                "2024-01-09",
            ]),
        },
        OccurrenceCase {
            name: "dense_rule_in_narrow_window",
            rule: "FREQ=YEARLY;BYMONTH=1,2,3,4,5,6,7,8,9,10,11,12;\
                   BYMONTHDAY=1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31;\
                   BYHOUR=0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23;\
                   BYMINUTE=0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,\
                   30,31,32,33,34,35,36,37,38,39,40,41,42,43,44,45,46,47,48,49,50,51,52,53,54,55,56,57,58,59;\
                   BYSECOND=0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,\
                   30,31,32,33,34,35,36,37,38,39,40,41,42,43,44,45,46,47,48,49,50,51,52,53,54,55,56,57,58,59",
            after: "2024-01-01T00:00:00",
            before: "2024-01-01T00:00:03",
            expected: Expected::Occurrences(&[
                "2024-01-01",
                "2024-01-01T00:00:01",
                "2024-01-01T00:00:02",
            ]),
        },
        OccurrenceCase {
            name: "each_occurrence_uses_its_own_form",
            rule: "DTSTART:2024-01-01\nRRULE:FREQ=DAILY;COUNT=1\nRDATE:2024-01-01T12:00:00",
            after: "2024-01-01",
            before: "2024-01-02",
            expected: Expected::Occurrences(&["2024-01-01", "2024-01-01T12:00:00"]),
        },
        OccurrenceCase {
            name: "february_30th_never_occurs",
            rule: "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30",
            after: "2000-01-01",
            before: "9000-01-01",
            expected: Expected::Overflow,
        },
    ]
}

pub fn limits() -> ExpansionLimits {
    ExpansionLimits {
        max_empty_periods: 1_000,
        max_occurrences: None,
    }
}

pub fn assert_case(case: &OccurrenceCase) {
    let result = occurrences_between(case.rule, case.after, case.before, &limits());

    match (&case.expected, result) {
        (Expected::Occurrences(expected), Ok(list)) => {
            assert_eq!(list.as_slice(), *expected, "Case {} did not match", case.name);
        }
        (Expected::Len(expected), Ok(list)) => {
            assert_eq!(
                list.len(),
                *expected,
                "Case {} expected {} occurrences",
                case.name,
                expected
            );
        }
        (Expected::Rule(kind), Err(ServiceError::RfcError(RfcError::Rule(err)))) => {
            assert_eq!(err.kind, *kind, "Case {} failed with {err}", case.name);
        }
        (
            Expected::BoundParse(which),
            Err(ServiceError::RfcError(RfcError::Bound(BoundError::Parse { which: actual, .. }))),
        ) => {
            assert_eq!(actual, *which, "Case {} blamed the wrong bound", case.name);
        }
        (Expected::BoundOrder, Err(ServiceError::RfcError(RfcError::Bound(BoundError::Order { .. }))))
        | (
            Expected::Overflow,
            Err(ServiceError::RfcError(RfcError::Expansion(
                ExpansionError::GenerationOverflow { .. },
            ))),
        ) => {}
        (_, Ok(list)) => panic!("Case {} unexpectedly produced {:?}", case.name, list.as_slice()),
        (_, Err(err)) => panic!("Case {} failed with unexpected error: {err}", case.name),
    }
}
