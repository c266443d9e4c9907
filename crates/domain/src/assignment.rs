// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rest_day::rest_date;
use crate::task::{BuiltInTask, Cadence, TaskId};
use crate::types::{DateRange, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// A single duty placed on a member.
///
/// Assignments are produced by the scheduler and never mutated afterwards.
/// Swaps and manual edits happen outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The fairness identifier the assignment counts against.
    pub task: TaskId,
    /// The assigned member.
    pub member: MemberId,
    /// The calendar date of the duty.
    pub date: Date,
    /// For weekly duties, the first day of the covering week.
    pub week_anchor: Option<Date>,
    /// Shift label (daily) or role label (weekly/monthly).
    pub label: Option<String>,
    /// Cadence of the producing task.
    pub recurrence: Option<Cadence>,
}

impl Assignment {
    /// Creates an assignment with no week anchor, label or recurrence tag.
    #[must_use]
    pub const fn new(task: TaskId, member: MemberId, date: Date) -> Self {
        Self {
            task,
            member,
            date,
            week_anchor: None,
            label: None,
            recurrence: None,
        }
    }

    /// Sets the week anchor.
    #[must_use]
    pub const fn with_week_anchor(mut self, anchor: Date) -> Self {
        self.week_anchor = Some(anchor);
        self
    }

    /// Sets the shift or role label.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Sets the recurrence tag.
    #[must_use]
    pub const fn with_recurrence(mut self, cadence: Cadence) -> Self {
        self.recurrence = Some(cadence);
        self
    }
}

/// The result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The requested date range.
    pub range: DateRange,
    /// Assignments in production order.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty schedule for `range`.
    #[must_use]
    pub const fn new(range: DateRange) -> Self {
        Self {
            range,
            assignments: Vec::new(),
        }
    }

    /// Returns the number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns whether the schedule holds no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the assignments on `date`.
    pub fn for_date(&self, date: Date) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.date == date)
    }

    /// Returns the assignments held by `member`.
    pub fn for_member<'a>(&'a self, member: &'a MemberId) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| &a.member == member)
    }

    /// Returns the assignments counted against `task`.
    pub fn for_task<'a>(&'a self, task: &'a TaskId) -> impl Iterator<Item = &'a Assignment> {
        self.assignments.iter().filter(move |a| &a.task == task)
    }

    /// Returns the rest dates earned by the heavy monitoring role.
    ///
    /// Only the built-in midday-and-night role is known to be
    /// rest-triggering from the assignment alone.
    #[must_use]
    pub fn rest_dates(&self) -> BTreeSet<Date> {
        let heavy: TaskId = TaskId::BuiltIn(BuiltInTask::MonitoringMidnight);
        self.for_task(&heavy)
            .filter_map(|a| rest_date(a.date))
            .collect()
    }
}
