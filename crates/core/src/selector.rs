// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::context::RunContext;
use crate::error::CoreError;
use crate::ledger::FairnessLedger;
use crate::tie_break::tie_break_index;
use rota_domain::calendar::iso_date;
use rota_domain::{Member, MemberId, TaskId};
use std::collections::BTreeMap;
use time::Date;
use tracing::debug;

/// Per-member target shares for one monthly allocation.
///
/// Targets are `floor(total / n)` for every pool member plus one for the
/// first `total mod n` members ranked by ascending current count (member
/// id breaks ties).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetShares {
    targets: BTreeMap<MemberId, u32>,
    assigned: BTreeMap<MemberId, u32>,
}

impl TargetShares {
    /// Computes targets for `pool` over `total_slots` slots of `task`.
    #[must_use]
    pub fn compute(
        pool: &[&Member],
        task: &TaskId,
        total_slots: u32,
        ledger: &FairnessLedger,
    ) -> Self {
        let Ok(members) = u32::try_from(pool.len()) else {
            return Self::default();
        };
        if members == 0 {
            return Self::default();
        }

        let base: u32 = total_slots / members;
        let extra: usize = usize::try_from(total_slots % members).unwrap_or(0);

        let mut ranked: Vec<(u32, &MemberId)> = pool
            .iter()
            .map(|member| (ledger.count(&member.id, task), &member.id))
            .collect();
        ranked.sort();

        let targets: BTreeMap<MemberId, u32> = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (_, id))| (id.clone(), base + u32::from(rank < extra)))
            .collect();

        Self {
            targets,
            assigned: BTreeMap::new(),
        }
    }

    /// Returns the target for `member`.
    #[must_use]
    pub fn target(&self, member: &MemberId) -> u32 {
        self.targets.get(member).copied().unwrap_or(0)
    }

    /// Returns how many slots `member` received in this allocation.
    #[must_use]
    pub fn assigned(&self, member: &MemberId) -> u32 {
        self.assigned.get(member).copied().unwrap_or(0)
    }

    /// Returns the selection bias: assigned minus target. Lower means
    /// further below target.
    #[must_use]
    pub fn bias(&self, member: &MemberId) -> i64 {
        i64::from(self.assigned(member)) - i64::from(self.target(member))
    }

    /// Records a slot for `member`.
    pub fn record(&mut self, member: &MemberId) {
        let count: &mut u32 = self.assigned.entry(member.clone()).or_insert(0);
        *count = count.saturating_add(1);
    }
}

/// Chooses one member for a slot and records the decision.
///
/// The lowest `(bias, task count, total count)` wins. Ties are resolved by
/// sorting the tied members by id and indexing with the slot's
/// tie-break hash. The ledger is incremented for the winner and a decision
/// entry is appended to the audit log, preceded by a tie-break entry when
/// a tie occurred.
///
/// # Arguments
///
/// * `candidates` - Eligible members (non-empty)
/// * `task` - Fairness identifier of the slot
/// * `date` - Slot date
/// * `shares` - Monthly target shares, if any
/// * `ctx` - Run context holding the ledger and audit log
///
/// # Errors
///
/// Returns `CoreError::SelectionInvariant` if `candidates` is empty.
pub fn select_assignee<'m>(
    candidates: &[&'m Member],
    task: &TaskId,
    date: Date,
    shares: Option<&TargetShares>,
    ctx: &mut RunContext,
) -> Result<&'m Member, CoreError> {
    let score = |member: &Member| -> (i64, u32, u32) {
        (
            shares.map_or(0, |shares| shares.bias(&member.id)),
            ctx.ledger.count(&member.id, task),
            ctx.ledger.total(&member.id),
        )
    };

    let Some(best) = candidates.iter().map(|member| score(*member)).min() else {
        return Err(CoreError::SelectionInvariant {
            task: task.clone(),
            date,
        });
    };

    let mut tied: Vec<&'m Member> = candidates
        .iter()
        .copied()
        .filter(|member| score(*member) == best)
        .collect();
    tied.sort_by(|a, b| a.id.cmp(&b.id));

    let index: usize = tie_break_index(date, task, tied.len());
    let chosen: &'m Member = tied.get(index).copied().ok_or_else(|| {
        CoreError::SelectionInvariant {
            task: task.clone(),
            date,
        }
    })?;

    if tied.len() > 1 {
        ctx.audit.record_decision(format!(
            "Tie-break for {task} on {}: selected {} from {} candidates",
            iso_date(date),
            chosen.name,
            tied.len()
        ));
    }

    let count: u32 = ctx.ledger.increment(&chosen.id, task);
    ctx.audit.record_decision(format!(
        "Selected {} for {task} on {} (count: {count})",
        chosen.name,
        iso_date(date)
    ));
    debug!(
        member = %chosen.id,
        task = %task,
        date = %date,
        count,
        tied = tied.len(),
        "Assignee selected"
    );

    Ok(chosen)
}
