// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ledger::FairnessLedger;
use rota_audit::AuditLog;
use rota_domain::calendar::add_days;
use rota_domain::{Assignment, MemberId, TaskId, rest_date};
use std::collections::BTreeMap;
use time::Date;

/// A member's placement on a date, as seen by the eligibility filter.
///
/// Placements carry the slot flags that later checks need; the public
/// `Assignment` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The calendar date of the placement.
    pub date: Date,
    /// Task family name.
    pub family: String,
    /// Fairness identifier.
    pub task: TaskId,
    /// Whether the slot earned a rest date.
    pub rest_required: bool,
    /// Whether the slot was cooldown-sensitive.
    pub cooldown_sensitive: bool,
    /// Whether the placement excludes the member from every other family
    /// that day.
    pub cross_task_exclusive: bool,
    /// Whether the placement came from a weekly duty.
    pub weekly: bool,
}

/// Mutable state of one generation run.
///
/// Created by the scheduler and threaded through the expanders by `&mut`
/// reference. Nothing outlives the run except the ledger and audit log
/// handed back to the caller.
#[derive(Debug)]
pub struct RunContext {
    /// Fairness counts, seeded by the caller.
    pub ledger: FairnessLedger,
    /// Decision trail.
    pub audit: AuditLog,
    /// Whether rest-triggering placements block the rest date.
    pub rest_rule_enabled: bool,
    assignments: Vec<Assignment>,
    placements: BTreeMap<MemberId, Vec<Placement>>,
}

impl RunContext {
    /// Creates a run context.
    #[must_use]
    pub const fn new(ledger: FairnessLedger, rest_rule_enabled: bool) -> Self {
        Self {
            ledger,
            audit: AuditLog::new(),
            rest_rule_enabled,
            assignments: Vec::new(),
            placements: BTreeMap::new(),
        }
    }

    /// Records an assignment together with its placement flags.
    pub fn place(&mut self, assignment: Assignment, placement: Placement) {
        self.placements
            .entry(assignment.member.clone())
            .or_default()
            .push(placement);
        self.assignments.push(assignment);
    }

    /// Returns the assignments produced so far, in production order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Consumes the context.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Assignment>, AuditLog, FairnessLedger) {
        (self.assignments, self.audit, self.ledger)
    }

    fn placements_of(&self, member: &MemberId) -> &[Placement] {
        self.placements.get(member).map_or(&[], Vec::as_slice)
    }

    /// Returns whether `date` is the rest date of one of `member`'s
    /// rest-triggering placements.
    ///
    /// Always false while the rest rule is disabled.
    #[must_use]
    pub fn is_resting(&self, member: &MemberId, date: Date) -> bool {
        self.rest_rule_enabled
            && self
                .placements_of(member)
                .iter()
                .any(|p| p.rest_required && rest_date(p.date) == Some(date))
    }

    /// Returns whether `member` already holds a placement in `family` on
    /// `date`.
    #[must_use]
    pub fn holds_family_on(&self, member: &MemberId, family: &str, date: Date) -> bool {
        self.placements_of(member)
            .iter()
            .any(|p| p.date == date && p.family == family)
    }

    /// Returns whether a placement of `member` in another family on `date`
    /// conflicts with a slot of `family`.
    ///
    /// # Arguments
    ///
    /// * `exclusive` - Whether the candidate slot itself is exclusive
    ///   across the run. When it is not, only other placements that are
    ///   run-wide exclusive conflict.
    #[must_use]
    pub fn conflicts_across_tasks(
        &self,
        member: &MemberId,
        family: &str,
        date: Date,
        exclusive: bool,
    ) -> bool {
        self.placements_of(member).iter().any(|p| {
            p.date == date && p.family != family && (exclusive || p.cross_task_exclusive)
        })
    }

    /// Returns how many days ago `member` last held a cooldown-sensitive
    /// placement of `task`, if within `window` days before `date`.
    #[must_use]
    pub fn cooldown_hit(
        &self,
        member: &MemberId,
        task: &TaskId,
        date: Date,
        window: u32,
    ) -> Option<u32> {
        (1..=window).find(|days_ago| {
            add_days(date, -i64::from(*days_ago)).is_some_and(|earlier| {
                self.placements_of(member).iter().any(|p| {
                    p.cooldown_sensitive && p.date == earlier && &p.task == task
                })
            })
        })
    }

    /// Returns whether `member` holds a weekly placement on `date`.
    #[must_use]
    pub fn holds_weekly_on(&self, member: &MemberId, date: Date) -> bool {
        self.placements_of(member)
            .iter()
            .any(|p| p.weekly && p.date == date)
    }
}
