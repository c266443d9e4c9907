// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rest-day policy.
//!
//! A rest-triggering assignment earns exactly one recovery date, fixed by
//! the weekday of the assignment:
//!
//! | Assignment | Rest date |
//! |------------|-----------|
//! | Monday     | Tuesday   |
//! | Tuesday    | Wednesday |
//! | Wednesday  | Thursday  |
//! | Thursday   | Friday    |
//! | Friday     | Monday (the weekend is skipped) |
//! | Saturday   | none      |
//! | Sunday     | none      |
//!
//! This is a policy table, not a "next day" rule.

use crate::calendar::add_days;
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// Returns the designated rest date for an assignment on `assignment_date`.
#[must_use]
pub fn rest_date(assignment_date: Date) -> Option<Date> {
    let offset: i64 = match assignment_date.weekday() {
        Weekday::Monday | Weekday::Tuesday | Weekday::Wednesday | Weekday::Thursday => 1,
        Weekday::Friday => 3,
        Weekday::Saturday | Weekday::Sunday => return None,
    };
    add_days(assignment_date, offset)
}

/// Returns whether `check` is the rest date earned by an assignment on
/// `assignment_date`.
#[must_use]
pub fn is_rest_date(check: Date, assignment_date: Date) -> bool {
    rest_date(assignment_date) == Some(check)
}

/// Collects the rest dates earned by a set of `(date, rest_required)` pairs.
pub fn rest_dates_for<I>(assignments: I) -> BTreeSet<Date>
where
    I: IntoIterator<Item = (Date, bool)>,
{
    assignments
        .into_iter()
        .filter(|(_, rest_required)| *rest_required)
        .filter_map(|(date, _)| rest_date(date))
        .collect()
}
