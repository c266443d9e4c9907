// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::Expansion;
use crate::context::RunContext;
use crate::eligibility::{SlotSpec, check_member};
use crate::error::CoreError;
use crate::resolve::WeekSettings;
use crate::selector::select_assignee;
use rota_domain::calendar::{add_days, iso_date, weekday_index, week_anchor};
use rota_domain::{Assignment, Cadence, DomainError, Member, MemberId, TaskId};
use std::collections::BTreeSet;
use time::Date;
use tracing::{debug, warn};

fn overflow(operation: &str) -> CoreError {
    CoreError::InvalidInput(DomainError::DateArithmeticOverflow {
        operation: operation.to_string(),
    })
}

/// Expands a weekly task over the range.
///
/// Weeks start on `week.start`; the first week may begin before the range.
/// Each week is handled once. A member qualifies for the week only if
/// every in-range covering day passes the eligibility filter. Roles are
/// filled in order from the qualifying members, each role holder excluded
/// from later roles. Every role emits one assignment per covering day, and
/// the ledger moves once per role holder per week.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows or the selector is
/// reached with no candidates.
pub fn expand_weekly(
    run: &Expansion<'_, '_>,
    week: &WeekSettings,
    ctx: &mut RunContext,
) -> Result<(), CoreError> {
    let first: Date = week_anchor(run.range.start(), week.start)
        .ok_or_else(|| overflow("computing the first week anchor"))?;
    let required: usize = run.settings.required_count;
    let role_keys: Vec<TaskId> = (0..required).map(|i| run.task.role_key(i)).collect();

    let mut anchor: Date = first;
    while anchor <= run.range.end() {
        let covering: Vec<Date> = (0..7)
            .filter_map(|offset| add_days(anchor, offset))
            .filter(|day| run.range.contains(*day))
            .filter(|day| week.covering_days.contains(&weekday_index(day.weekday())))
            .collect();

        if covering.is_empty() {
            debug!(task = %run.task.name, anchor = %anchor, "Week has no covering days");
            ctx.audit.record_skip(format!(
                "{} week of {}: no covering days in range",
                run.task.name,
                iso_date(anchor)
            ));
        } else {
            fill_week(run, &role_keys, anchor, &covering, ctx)?;
        }

        anchor = add_days(anchor, 7).ok_or_else(|| overflow("advancing to the next week"))?;
    }

    Ok(())
}

fn fill_week(
    run: &Expansion<'_, '_>,
    role_keys: &[TaskId],
    anchor: Date,
    covering: &[Date],
    ctx: &mut RunContext,
) -> Result<(), CoreError> {
    let Some(eligibility_key) = role_keys.first() else {
        return Ok(());
    };

    let qualifying: Vec<&Member> = run
        .pool
        .iter()
        .copied()
        .filter(|member| {
            covering.iter().all(|day| {
                let slot: SlotSpec<'_> = run.slot(eligibility_key, *day, false, false);
                check_member(member, &slot, ctx).is_ok()
            })
        })
        .collect();

    if qualifying.len() < role_keys.len() {
        warn!(
            task = %run.task.name,
            anchor = %anchor,
            eligible = qualifying.len(),
            required = role_keys.len(),
            "Insufficient members for week"
        );
        ctx.audit.record_warning(format!(
            "Insufficient eligible members for {} week of {}: {} eligible, {} required",
            run.task.name,
            iso_date(anchor),
            qualifying.len(),
            role_keys.len()
        ));
        return Ok(());
    }

    let mut chosen: BTreeSet<MemberId> = BTreeSet::new();
    for (index, key) in role_keys.iter().enumerate() {
        let candidates: Vec<&Member> = qualifying
            .iter()
            .copied()
            .filter(|member| !chosen.contains(&member.id))
            .collect();
        let holder: &Member = select_assignee(&candidates, key, anchor, None, ctx)?;
        chosen.insert(holder.id.clone());

        let label: String = run.task.role_label(index);
        for day in covering {
            let slot: SlotSpec<'_> = run.slot(key, *day, false, false);
            let assignment: Assignment = Assignment::new(key.clone(), holder.id.clone(), *day)
                .with_week_anchor(anchor)
                .with_label(&label)
                .with_recurrence(Cadence::Weekly);
            ctx.place(assignment, run.placement(&slot, true));
        }
    }

    Ok(())
}
