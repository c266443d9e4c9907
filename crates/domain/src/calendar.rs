// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar helpers shared by the policies and the expanders.
//!
//! Weekdays are numbered 0 (Monday) through 6 (Sunday) everywhere in the
//! rota, matching the numbering members use for their weekly pattern.

use time::{Date, Duration, Month, Weekday};

/// Returns the rota weekday number (0 = Monday .. 6 = Sunday).
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    weekday.number_days_from_monday()
}

/// Converts a rota weekday number back into a [`Weekday`].
///
/// Returns `None` for values outside 0..=6.
#[must_use]
pub const fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Monday),
        1 => Some(Weekday::Tuesday),
        2 => Some(Weekday::Wednesday),
        3 => Some(Weekday::Thursday),
        4 => Some(Weekday::Friday),
        5 => Some(Weekday::Saturday),
        6 => Some(Weekday::Sunday),
        _ => None,
    }
}

/// Shifts a date by a signed number of days.
///
/// Returns `None` if the result leaves the supported calendar range.
#[must_use]
pub fn add_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Duration::days(days))
}

/// Formats a date as `YYYY-MM-DD`.
///
/// This string feeds the tie-break hash, so its shape must never depend on
/// locale or formatter configuration.
#[must_use]
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Returns the last calendar day of the given month.
///
/// Handles 28/29/30/31-day months including leap Februaries.
#[must_use]
pub fn last_day_of_month(year: i32, month: Month) -> Option<Date> {
    let days: u8 = time::util::days_in_year_month(year, month);
    Date::from_calendar_date(year, month, days).ok()
}

/// Returns the start of the week containing `date`, where weeks begin on
/// `week_start`.
#[must_use]
pub fn week_anchor(date: Date, week_start: Weekday) -> Option<Date> {
    let current: i64 = i64::from(weekday_index(date.weekday()));
    let start: i64 = i64::from(weekday_index(week_start));
    let offset: i64 = (current - start).rem_euclid(7);
    add_days(date, -offset)
}

/// Returns the first day of the month following `date`'s month.
#[must_use]
pub fn first_of_next_month(date: Date) -> Option<Date> {
    let (year, month): (i32, Month) = if date.month() == Month::December {
        (date.year().checked_add(1)?, Month::January)
    } else {
        (date.year(), date.month().next())
    };
    Date::from_calendar_date(year, month, 1).ok()
}
