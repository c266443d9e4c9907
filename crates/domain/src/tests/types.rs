// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateRange, DomainError, Member, MemberId};
use time::{Date, Month};

fn date(month: Month, day: u8) -> Date {
    Date::from_calendar_date(2026, month, day).unwrap()
}

#[test]
fn test_member_id_trims_and_orders_lexicographically() {
    let a: MemberId = MemberId::new("  alice ");
    let b: MemberId = MemberId::new("bob");

    assert_eq!(a.value(), "alice");
    assert!(a < b);
    assert_eq!(format!("{a}"), "alice");
}

#[test]
fn test_date_range_rejects_inverted_bounds() {
    let result: Result<DateRange, DomainError> =
        DateRange::new(date(Month::March, 5), date(Month::March, 4));

    assert!(matches!(
        result,
        Err(DomainError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_inverted_date_range_fails_to_deserialize() {
    let result: Result<DateRange, serde_json::Error> =
        serde_json::from_str(r#"{"start": "2026-01-10", "end": "2026-01-05"}"#);

    let err: serde_json::Error = result.unwrap_err();
    assert!(
        err.to_string()
            .contains("Invalid date range: 2026-01-10 is after 2026-01-05")
    );

    let valid: DateRange =
        serde_json::from_str(r#"{"start": "2026-01-05", "end": "2026-01-10"}"#).unwrap();
    assert_eq!(valid.len_days(), 6);
}

#[test]
fn test_date_range_iterates_inclusive_days() {
    let range: DateRange =
        DateRange::new(date(Month::February, 27), date(Month::March, 2)).unwrap();
    let days: Vec<Date> = range.days().collect();

    assert_eq!(range.len_days(), 4);
    assert_eq!(days.len(), 4);
    assert_eq!(days.first().copied(), Some(date(Month::February, 27)));
    assert_eq!(days.last().copied(), Some(date(Month::March, 2)));
    assert!(range.contains(date(Month::March, 1)));
    assert!(!range.contains(date(Month::March, 3)));
}

#[test]
fn test_single_day_range() {
    let range: DateRange = DateRange::single(date(Month::June, 1));

    assert_eq!(range.len_days(), 1);
    assert_eq!(range.days().count(), 1);
}

#[test]
fn test_member_defaults_to_weekday_pattern() {
    let member: Member = Member::new("m1", "Alice");

    // 2026-01-05 is a Monday, 2026-01-10 a Saturday
    assert!(member.works_weekday_of(date(Month::January, 5)));
    assert!(!member.works_weekday_of(date(Month::January, 10)));
    assert!(
        member
            .always_available()
            .works_weekday_of(date(Month::January, 10))
    );
}

#[test]
fn test_member_exceptions_cover_dates_and_ranges() {
    let member: Member = Member::new("m1", "Alice")
        .with_unavailable_date(date(Month::January, 7))
        .with_unavailable_range(
            DateRange::new(date(Month::January, 12), date(Month::January, 14)).unwrap(),
        );

    assert!(member.has_exception_on(date(Month::January, 7)));
    assert!(member.has_exception_on(date(Month::January, 13)));
    assert!(!member.has_exception_on(date(Month::January, 8)));
    assert!(!member.has_exception_on(date(Month::January, 15)));
}

#[test]
fn test_member_deserializes_with_defaults() {
    let member: Member = serde_json::from_str(
        r#"{"id": "m9", "name": "Zed", "unavailable_dates": ["2026-01-07"]}"#,
    )
    .unwrap();

    assert_eq!(member.id, MemberId::new("m9"));
    assert_eq!(member.weekly_pattern.len(), 5);
    assert!(member.has_exception_on(date(Month::January, 7)));
    assert!(member.email.is_none());
}
