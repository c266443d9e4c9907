// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence expanders.
//!
//! Each expander walks the requested range once, in date order, filling
//! slots through the eligibility filter and the selector. Nothing is
//! revisited: a skipped slot stays skipped for the run.

mod daily;
mod monthly;
mod weekly;

pub use daily::expand_daily;
pub use monthly::{expand_monthly, monthly_anchors};
pub use weekly::expand_weekly;

use crate::context::Placement;
use crate::eligibility::SlotSpec;
use crate::resolve::TaskSettings;
use rota_domain::{DateRange, Member, TaskDefinition, TaskId};
use time::Date;

/// One task's expansion inputs.
#[derive(Debug, Clone, Copy)]
pub struct Expansion<'a, 'm> {
    /// The task being expanded.
    pub task: &'a TaskDefinition,
    /// Resolved settings of the task.
    pub settings: TaskSettings,
    /// Members eligible in principle, in member-list order.
    pub pool: &'a [&'m Member],
    /// The requested range.
    pub range: DateRange,
}

impl Expansion<'_, '_> {
    /// Builds the slot description for a slot of this task.
    pub(crate) fn slot<'s>(
        &'s self,
        task: &'s TaskId,
        date: Date,
        rest_required: bool,
        cooldown_sensitive: bool,
    ) -> SlotSpec<'s> {
        SlotSpec {
            family: &self.task.name,
            task,
            date,
            class: self.settings.class,
            rest_required,
            cooldown_sensitive,
            cooldown_days: self.settings.cooldown_days,
            cross_task_exclusive: self.settings.cross_task_exclusive,
        }
    }

    /// Builds the placement recorded alongside an assignment.
    pub(crate) fn placement(&self, slot: &SlotSpec<'_>, weekly: bool) -> Placement {
        Placement {
            date: slot.date,
            family: self.task.name.clone(),
            task: slot.task.clone(),
            rest_required: slot.rest_required,
            cooldown_sensitive: slot.cooldown_sensitive,
            cross_task_exclusive: slot.cross_task_exclusive,
            weekly,
        }
    }
}
