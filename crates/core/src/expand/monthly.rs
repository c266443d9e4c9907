// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::Expansion;
use crate::context::RunContext;
use crate::eligibility::{SlotSpec, eligible_candidates};
use crate::error::CoreError;
use crate::selector::{TargetShares, select_assignee};
use rota_audit::AuditLog;
use rota_domain::calendar::{add_days, first_of_next_month, iso_date, last_day_of_month};
use rota_domain::{Assignment, Cadence, DateRange, DayOfMonth, Member, MemberId, TaskId};
use std::collections::BTreeSet;
use time::{Date, Weekday};
use tracing::{debug, warn};

fn in_range(range: &DateRange, date: Option<Date>) -> Option<Date> {
    date.filter(|date| range.contains(*date))
}

/// Moves a weekend anchor onto a weekday inside `range`.
///
/// Saturday prefers the Friday before, then the Monday after. Sunday
/// prefers the Monday after, then the Friday before. Weekday anchors are
/// kept only if inside the range.
fn adjust_anchor(anchor: Date, range: &DateRange) -> Option<Date> {
    match anchor.weekday() {
        Weekday::Saturday => in_range(range, add_days(anchor, -1))
            .or_else(|| in_range(range, add_days(anchor, 2))),
        Weekday::Sunday => in_range(range, add_days(anchor, 1))
            .or_else(|| in_range(range, add_days(anchor, -2))),
        _ => in_range(range, Some(anchor)),
    }
}

/// Computes the occurrence dates of a monthly task inside `range`.
///
/// One anchor is computed per month overlapping the range: the fixed day
/// (clamped to the month's length) or the true last day of the month.
/// Weekend anchors are adjusted; anchors that cannot land in range are
/// dropped, as are adjusted anchors that collide with an earlier
/// occurrence. Clamps, drops and collisions are recorded in `audit`.
#[must_use]
pub fn monthly_anchors(
    task_name: &str,
    range: &DateRange,
    day: DayOfMonth,
    audit: &mut AuditLog,
) -> Vec<Date> {
    let mut anchors: Vec<Date> = Vec::new();
    let mut seen: BTreeSet<Date> = BTreeSet::new();
    let mut month_start: Option<Date> = range.start().replace_day(1).ok();

    while let Some(first) = month_start.filter(|first| *first <= range.end()) {
        month_start = first_of_next_month(first);

        let Some(last) = last_day_of_month(first.year(), first.month()) else {
            continue;
        };
        let anchor: Date = match day {
            DayOfMonth::EndOfMonth => last,
            DayOfMonth::Fixed(requested) if requested > last.day() => {
                audit.record_decision(format!(
                    "{task_name}: day {requested} does not exist in {} {}, using {}",
                    first.month(),
                    first.year(),
                    iso_date(last)
                ));
                last
            }
            DayOfMonth::Fixed(requested) => first.replace_day(requested).unwrap_or(last),
        };

        let Some(adjusted) = adjust_anchor(anchor, range) else {
            if matches!(anchor.weekday(), Weekday::Saturday | Weekday::Sunday) {
                audit.record_skip(format!(
                    "{task_name} on {} ({}): no weekday alternative in range",
                    iso_date(anchor),
                    anchor.weekday()
                ));
            } else {
                debug!(task = task_name, anchor = %anchor, "Monthly anchor outside range");
            }
            continue;
        };

        if !seen.insert(adjusted) {
            audit.record_skip(format!(
                "{task_name} on {}: already scheduled for {}",
                iso_date(anchor),
                iso_date(adjusted)
            ));
            continue;
        }
        if adjusted != anchor {
            audit.record_decision(format!(
                "{task_name}: moved {} ({}) to {}",
                iso_date(anchor),
                anchor.weekday(),
                iso_date(adjusted)
            ));
        }
        anchors.push(adjusted);
    }

    anchors
}

/// Expands a monthly task over the range.
///
/// Target shares are computed once from the occurrence count before any
/// slot is filled; selection is then biased toward members furthest below
/// their target. Each occurrence needs `required_count` distinct members
/// or is skipped with a shortfall warning.
///
/// # Errors
///
/// Returns `CoreError::SelectionInvariant` only if the selector is reached
/// with no candidates.
pub fn expand_monthly(
    run: &Expansion<'_, '_>,
    day: DayOfMonth,
    ctx: &mut RunContext,
) -> Result<(), CoreError> {
    let anchors: Vec<Date> = monthly_anchors(&run.task.name, &run.range, day, &mut ctx.audit);
    let required: usize = run.settings.required_count;
    let fairness_key: TaskId = run.task.role_key(0);

    let total_slots: u32 =
        u32::try_from(anchors.len().saturating_mul(required)).unwrap_or(u32::MAX);
    let mut shares: TargetShares =
        TargetShares::compute(run.pool, &fairness_key, total_slots, &ctx.ledger);

    for date in anchors {
        let slot: SlotSpec<'_> = run.slot(&fairness_key, date, false, false);
        let none_excluded: BTreeSet<MemberId> = BTreeSet::new();
        let eligible: Vec<&Member> = eligible_candidates(run.pool, &slot, &none_excluded, ctx);

        if eligible.len() < required {
            warn!(
                task = %run.task.name,
                date = %date,
                eligible = eligible.len(),
                required,
                "Insufficient members for monthly occurrence"
            );
            ctx.audit.record_warning(format!(
                "Insufficient eligible members for {} on {}: {} eligible, {} required",
                run.task.name,
                iso_date(date),
                eligible.len(),
                required
            ));
            continue;
        }

        let mut chosen: BTreeSet<MemberId> = BTreeSet::new();
        for index in 0..required {
            let key: TaskId = run.task.role_key(index);
            let candidates: Vec<&Member> = eligible
                .iter()
                .copied()
                .filter(|member| !chosen.contains(&member.id))
                .collect();
            let holder: &Member = select_assignee(&candidates, &key, date, Some(&shares), ctx)?;
            shares.record(&holder.id);
            chosen.insert(holder.id.clone());

            let role_slot: SlotSpec<'_> = run.slot(&key, date, false, false);
            let assignment: Assignment = Assignment::new(key.clone(), holder.id.clone(), date)
                .with_label(&run.task.role_label(index))
                .with_recurrence(Cadence::Monthly);
            ctx.place(assignment, run.placement(&role_slot, false));
        }
    }

    Ok(())
}
