// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::context::RunContext;
use rota_domain::{Member, MemberId, TaskClass, TaskId, is_available, rest_date};
use std::collections::BTreeSet;
use time::Date;
use tracing::trace;

/// Everything the eligibility filter needs to know about one slot.
#[derive(Debug, Clone)]
pub struct SlotSpec<'a> {
    /// Task family name.
    pub family: &'a str,
    /// Fairness identifier of the slot.
    pub task: &'a TaskId,
    /// Slot date.
    pub date: Date,
    /// Availability mode of the task.
    pub class: TaskClass,
    /// Whether the slot earns a rest date.
    pub rest_required: bool,
    /// Whether the slot is subject to the cooldown window.
    pub cooldown_sensitive: bool,
    /// Cooldown window in days.
    pub cooldown_days: u32,
    /// Whether any placement in another family that day blocks the member.
    pub cross_task_exclusive: bool,
}

/// Why a member was rejected for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// The availability policy rejected the date.
    Unavailable,
    /// The date is the member's rest date.
    Resting,
    /// The member already holds a slot of this family that day.
    AlreadyPlaced,
    /// The member holds a conflicting slot of another family that day.
    CrossTaskConflict,
    /// The member held the same cooldown-sensitive role recently.
    Cooldown {
        /// Days since the earlier placement.
        days_ago: u32,
    },
    /// The rest date earned by this slot falls on one of the member's
    /// weekly placements.
    RestOverlapsWeekly {
        /// The rest date that would be earned.
        rest_date: Date,
    },
    /// The member was already chosen for this occurrence.
    AlreadyChosen,
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "unavailable"),
            Self::Resting => write!(f, "resting"),
            Self::AlreadyPlaced => write!(f, "already placed in family"),
            Self::CrossTaskConflict => write!(f, "placed in another task"),
            Self::Cooldown { days_ago } => write!(f, "cooldown ({days_ago} days ago)"),
            Self::RestOverlapsWeekly { rest_date } => {
                write!(f, "rest date {rest_date} overlaps weekly duty")
            }
            Self::AlreadyChosen => write!(f, "already chosen for this occurrence"),
        }
    }
}

/// Checks a single member against a slot.
///
/// # Arguments
///
/// * `member` - The candidate
/// * `slot` - The slot being filled
/// * `ctx` - Placements made earlier in the run
///
/// # Errors
///
/// Returns the first rule the member fails, in evaluation order.
pub fn check_member(
    member: &Member,
    slot: &SlotSpec<'_>,
    ctx: &RunContext,
) -> Result<(), Ineligibility> {
    if !is_available(member, slot.date, slot.class) {
        return Err(Ineligibility::Unavailable);
    }

    if ctx.is_resting(&member.id, slot.date) {
        return Err(Ineligibility::Resting);
    }

    if ctx.holds_family_on(&member.id, slot.family, slot.date) {
        return Err(Ineligibility::AlreadyPlaced);
    }

    if ctx.conflicts_across_tasks(&member.id, slot.family, slot.date, slot.cross_task_exclusive) {
        return Err(Ineligibility::CrossTaskConflict);
    }

    if slot.cooldown_sensitive
        && let Some(days_ago) =
            ctx.cooldown_hit(&member.id, slot.task, slot.date, slot.cooldown_days)
    {
        return Err(Ineligibility::Cooldown { days_ago });
    }

    if slot.rest_required
        && ctx.rest_rule_enabled
        && let Some(rest) = rest_date(slot.date)
        && ctx.holds_weekly_on(&member.id, rest)
    {
        return Err(Ineligibility::RestOverlapsWeekly { rest_date: rest });
    }

    Ok(())
}

/// Filters `pool` down to the members eligible for `slot`.
///
/// Members in `excluded` (already chosen for the same occurrence) are
/// rejected first. Pool order is preserved.
#[must_use]
pub fn eligible_candidates<'m>(
    pool: &[&'m Member],
    slot: &SlotSpec<'_>,
    excluded: &BTreeSet<MemberId>,
    ctx: &RunContext,
) -> Vec<&'m Member> {
    pool.iter()
        .copied()
        .filter(|member| {
            let verdict: Result<(), Ineligibility> = if excluded.contains(&member.id) {
                Err(Ineligibility::AlreadyChosen)
            } else {
                check_member(member, slot, ctx)
            };
            if let Err(reason) = verdict {
                trace!(
                    member = %member.id,
                    task = %slot.task,
                    date = %slot.date,
                    %reason,
                    "Candidate rejected"
                );
            }
            verdict.is_ok()
        })
        .collect()
}
