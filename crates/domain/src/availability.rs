// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member availability policy.
//!
//! ## Rules (in order)
//!
//! 1. A date in the member's unavailable-date set is never workable
//! 2. A date inside any unavailable range (inclusive) is never workable
//! 3. Pattern-exempt task classes ignore the weekly pattern
//! 4. Otherwise the date's weekday must be in the weekly pattern
//!
//! Around-the-clock duties run every day regardless of a member's normal
//! office pattern; weekly dual-role duties require presence on every
//! covering day. Both share the explicit-exception rules.

use crate::task::TaskClass;
use crate::types::Member;
use time::Date;

/// Decides whether `member` can work on `date` for a task of class `class`.
#[must_use]
pub fn is_available(member: &Member, date: Date, class: TaskClass) -> bool {
    if member.has_exception_on(date) {
        return false;
    }

    match class {
        TaskClass::PatternExempt => true,
        TaskClass::PatternEnforced => member.works_weekday_of(date),
    }
}

/// Returns whether `member` is available on every date yielded by `dates`.
pub fn is_available_on_all<I>(member: &Member, dates: I, class: TaskClass) -> bool
where
    I: IntoIterator<Item = Date>,
{
    dates
        .into_iter()
        .all(|date| is_available(member, date, class))
}
