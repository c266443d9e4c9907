// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::calendar::add_days;
use rota_domain::{Assignment, Member, MemberId, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Historical per-member, per-task counts supplied by the caller.
pub type SeedCounts = BTreeMap<MemberId, BTreeMap<TaskId, u32>>;

/// Running per-member, per-task assignment counts for one run.
///
/// Counts only ever increase. The selector is the sole writer; expanders
/// and the eligibility filter read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FairnessLedger {
    counts: SeedCounts,
}

/// One member's row of a fairness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The member identifier.
    pub member: MemberId,
    /// The member's display name.
    pub name: String,
    /// Counts per fairness identifier.
    pub counts: BTreeMap<TaskId, u32>,
    /// Sum of all counts.
    pub total: u32,
}

impl FairnessLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Creates a ledger starting from historical counts.
    #[must_use]
    pub const fn seeded(counts: SeedCounts) -> Self {
        Self { counts }
    }

    /// Rebuilds seed counts from persisted assignments.
    ///
    /// Only assignments dated on or after `as_of - window_days` are
    /// counted. Assignments carrying a week anchor count once per member,
    /// task and week, matching how the weekly expander increments the
    /// ledger.
    ///
    /// # Arguments
    ///
    /// * `history` - Previously generated assignments
    /// * `as_of` - The reference date, usually the first day of the next run
    /// * `window_days` - Length of the rolling window
    #[must_use]
    pub fn from_history(history: &[Assignment], as_of: Date, window_days: u32) -> Self {
        let cutoff: Option<Date> = add_days(as_of, -i64::from(window_days));
        let mut ledger: Self = Self::new();
        let mut weeks_seen: BTreeSet<(&MemberId, &TaskId, Date)> = BTreeSet::new();

        for assignment in history {
            if cutoff.is_some_and(|cutoff| assignment.date < cutoff) {
                continue;
            }
            if let Some(anchor) = assignment.week_anchor
                && !weeks_seen.insert((&assignment.member, &assignment.task, anchor))
            {
                continue;
            }
            ledger.increment(&assignment.member, &assignment.task);
        }

        ledger
    }

    /// Returns the count for `member` on `task`.
    #[must_use]
    pub fn count(&self, member: &MemberId, task: &TaskId) -> u32 {
        self.counts
            .get(member)
            .and_then(|tasks| tasks.get(task))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the sum of all of `member`'s counts.
    #[must_use]
    pub fn total(&self, member: &MemberId) -> u32 {
        self.counts
            .get(member)
            .map_or(0, |tasks| tasks.values().sum())
    }

    /// Increments the count for `member` on `task`.
    ///
    /// # Returns
    ///
    /// The count after the increment.
    pub fn increment(&mut self, member: &MemberId, task: &TaskId) -> u32 {
        let count: &mut u32 = self
            .counts
            .entry(member.clone())
            .or_default()
            .entry(task.clone())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Returns the raw counts, for write-back by the caller.
    #[must_use]
    pub const fn counts(&self) -> &SeedCounts {
        &self.counts
    }

    /// Consumes the ledger, returning the raw counts.
    #[must_use]
    pub fn into_counts(self) -> SeedCounts {
        self.counts
    }

    /// Builds a per-member report in member-list order.
    ///
    /// Members with no history still get a row with zero counts.
    #[must_use]
    pub fn report(&self, members: &[Member]) -> Vec<LedgerRow> {
        members
            .iter()
            .map(|member| {
                let counts: BTreeMap<TaskId, u32> =
                    self.counts.get(&member.id).cloned().unwrap_or_default();
                LedgerRow {
                    member: member.id.clone(),
                    name: member.name.clone(),
                    total: self.total(&member.id),
                    counts,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rota_domain::BuiltInTask;
    use time::Month;

    fn date(month: Month, day: u8) -> Date {
        Date::from_calendar_date(2026, month, day).unwrap()
    }

    fn maker() -> TaskId {
        TaskId::BuiltIn(BuiltInTask::ReviewMaker)
    }

    fn morning() -> TaskId {
        TaskId::BuiltIn(BuiltInTask::MonitoringMorning)
    }

    #[test]
    fn test_increment_returns_new_count() {
        let mut ledger: FairnessLedger = FairnessLedger::new();
        let alice: MemberId = MemberId::new("alice");

        assert_eq!(ledger.increment(&alice, &morning()), 1);
        assert_eq!(ledger.increment(&alice, &morning()), 2);
        assert_eq!(ledger.increment(&alice, &maker()), 1);
        assert_eq!(ledger.count(&alice, &morning()), 2);
        assert_eq!(ledger.total(&alice), 3);
        assert_eq!(ledger.total(&MemberId::new("nobody")), 0);
    }

    #[test]
    fn test_seeded_ledger_starts_from_history() {
        let mut seed: SeedCounts = SeedCounts::new();
        seed.entry(MemberId::new("bob"))
            .or_default()
            .insert(morning(), 5);
        let mut ledger: FairnessLedger = FairnessLedger::seeded(seed);

        assert_eq!(ledger.count(&MemberId::new("bob"), &morning()), 5);
        assert_eq!(ledger.increment(&MemberId::new("bob"), &morning()), 6);
    }

    #[test]
    fn test_from_history_respects_window_and_weeks() {
        let alice: MemberId = MemberId::new("alice");
        let anchor: Date = date(Month::March, 2);
        let mut history: Vec<Assignment> = (0..6)
            .map(|offset| {
                Assignment::new(maker(), alice.clone(), add_days(anchor, offset).unwrap())
                    .with_week_anchor(anchor)
            })
            .collect();
        history.push(Assignment::new(morning(), alice.clone(), date(Month::March, 10)));
        // Outside a 30-day window ending on April 1st
        history.push(Assignment::new(morning(), alice.clone(), date(Month::January, 5)));

        let ledger: FairnessLedger =
            FairnessLedger::from_history(&history, date(Month::April, 1), 30);

        assert_eq!(ledger.count(&alice, &maker()), 1);
        assert_eq!(ledger.count(&alice, &morning()), 1);
    }

    #[test]
    fn test_report_lists_every_member() {
        let members: Vec<Member> = vec![Member::new("alice", "Alice"), Member::new("bob", "Bob")];
        let mut ledger: FairnessLedger = FairnessLedger::new();
        ledger.increment(&MemberId::new("bob"), &maker());

        let report: Vec<LedgerRow> = ledger.report(&members);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Alice");
        assert_eq!(report[0].total, 0);
        assert_eq!(report[1].counts.get(&maker()), Some(&1));
        assert_eq!(report[1].total, 1);
    }
}
