// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::Expansion;
use crate::context::RunContext;
use crate::eligibility::{SlotSpec, eligible_candidates};
use crate::error::CoreError;
use crate::selector::select_assignee;
use rota_domain::calendar::iso_date;
use rota_domain::{Assignment, Cadence, Member, MemberId, ShiftTable, TaskId, rest_date};
use std::collections::BTreeSet;
use tracing::warn;

/// Expands a daily task over the range.
///
/// For each date the weekday's shifts are filled in table order, seat by
/// seat. Members placed earlier that date in the same family are
/// excluded. A seat with no eligible member is recorded as a shortfall and
/// the rest of that shift is skipped.
///
/// # Arguments
///
/// * `run` - The task expansion inputs
/// * `table` - The resolved weekday shift table
/// * `ctx` - The run context
///
/// # Errors
///
/// Returns `CoreError::SelectionInvariant` only if the selector is reached
/// with no candidates.
pub fn expand_daily(
    run: &Expansion<'_, '_>,
    table: &ShiftTable,
    ctx: &mut RunContext,
) -> Result<(), CoreError> {
    let none_excluded: BTreeSet<MemberId> = BTreeSet::new();

    for date in run.range.days() {
        for shift in table.for_weekday(date.weekday()) {
            let key: TaskId = run.task.shift_key(shift);
            let slot: SlotSpec<'_> =
                run.slot(&key, date, shift.rest_required, shift.cooldown_sensitive);

            for _ in 0..shift.required_count {
                let candidates: Vec<&Member> =
                    eligible_candidates(run.pool, &slot, &none_excluded, ctx);
                if candidates.is_empty() {
                    warn!(
                        task = %run.task.name,
                        shift = %shift.label,
                        date = %date,
                        "No eligible members for shift"
                    );
                    ctx.audit.record_warning(format!(
                        "No eligible members for {} shift '{}' on {}",
                        run.task.name,
                        shift.label,
                        iso_date(date)
                    ));
                    break;
                }

                let chosen: &Member = select_assignee(&candidates, &key, date, None, ctx)?;

                if slot.rest_required
                    && ctx.rest_rule_enabled
                    && let Some(rest) = rest_date(date)
                {
                    ctx.audit.record_decision(format!(
                        "{} rests on {} after {} on {}",
                        chosen.name,
                        iso_date(rest),
                        shift.label,
                        iso_date(date)
                    ));
                }

                let assignment: Assignment = Assignment::new(key.clone(), chosen.id.clone(), date)
                    .with_label(&shift.label)
                    .with_recurrence(Cadence::Daily);
                ctx.place(assignment, run.placement(&slot, false));
            }
        }
    }

    Ok(())
}
