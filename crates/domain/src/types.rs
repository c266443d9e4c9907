// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::weekday_index;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// Represents a member's stable identifier.
///
/// Member identifiers are the secondary ordering key for tie-breaking, so
/// they order lexicographically by their string value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId {
    value: String,
}

impl MemberId {
    /// Creates a new `MemberId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value (leading/trailing whitespace is trimmed)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An inclusive span of dates.
///
/// Used both for member unavailability periods and for the requested
/// generation range. Deserialization goes through `DateRange::new`, so an
/// inverted range is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: Date,
    end: Date,
}

/// Unchecked wire form of a `DateRange`.
#[derive(Deserialize)]
struct RawDateRange {
    start: Date,
    end: Date,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new inclusive `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
    pub const fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start.to_julian_day() > end.to_julian_day() {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a single-day range.
    #[must_use]
    pub const fn single(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` falls inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the number of days in the range.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        i64::from(self.end.to_julian_day() - self.start.to_julian_day()) + 1
    }

    /// Iterates every day of the range in ascending order.
    ///
    /// Yields nothing if `start` is after `end`.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        let end: Date = self.end;
        let first: Option<Date> = Some(self.start).filter(|start| *start <= end);
        std::iter::successors(first, move |current| {
            current.next_day().filter(|next| *next <= end)
        })
    }
}

fn default_weekly_pattern() -> BTreeSet<u8> {
    (0..5).collect()
}

/// A team member as seen by the allocation engine.
///
/// Members are immutable snapshots for the duration of one run. The
/// weekly pattern holds weekday numbers (0 = Monday .. 6 = Sunday) and
/// defaults to Monday through Friday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's stable identifier.
    pub id: MemberId,
    /// The member's display name.
    pub name: String,
    /// Weekdays on which the member normally works.
    #[serde(default = "default_weekly_pattern")]
    pub weekly_pattern: BTreeSet<u8>,
    /// Individual dates on which the member cannot work.
    #[serde(default)]
    pub unavailable_dates: BTreeSet<Date>,
    /// Inclusive periods during which the member cannot work.
    #[serde(default)]
    pub unavailable_ranges: Vec<DateRange>,
    /// Contact address, carried for collaborators only.
    #[serde(default)]
    pub email: Option<String>,
}

impl Member {
    /// Creates a new `Member` with the default Monday-Friday pattern and no
    /// exceptions.
    ///
    /// # Arguments
    ///
    /// * `id` - The member identifier
    /// * `name` - The display name
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.to_string(),
            weekly_pattern: default_weekly_pattern(),
            unavailable_dates: BTreeSet::new(),
            unavailable_ranges: Vec::new(),
            email: None,
        }
    }

    /// Replaces the weekly pattern.
    #[must_use]
    pub fn with_weekly_pattern<I>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.weekly_pattern = days.into_iter().collect();
        self
    }

    /// Marks the member as working every day of the week.
    #[must_use]
    pub fn always_available(self) -> Self {
        self.with_weekly_pattern(0..7)
    }

    /// Adds a single unavailable date.
    #[must_use]
    pub fn with_unavailable_date(mut self, date: Date) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    /// Adds an inclusive unavailable period.
    #[must_use]
    pub fn with_unavailable_range(mut self, range: DateRange) -> Self {
        self.unavailable_ranges.push(range);
        self
    }

    /// Returns whether `date` falls on one of the member's pattern weekdays.
    #[must_use]
    pub fn works_weekday_of(&self, date: Date) -> bool {
        self.weekly_pattern.contains(&weekday_index(date.weekday()))
    }

    /// Returns whether `date` is covered by an explicit exception.
    #[must_use]
    pub fn has_exception_on(&self, date: Date) -> bool {
        self.unavailable_dates.contains(&date)
            || self
                .unavailable_ranges
                .iter()
                .any(|range| range.contains(date))
    }
}
