// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turns a task's rule bag into typed settings.
//!
//! Missing or malformed rules never abort a run. Each one is replaced by
//! its documented default and the substitution is recorded as a `CONFIG:`
//! entry.

use crate::config::SchedulingConfig;
use rota_audit::AuditLog;
use rota_domain::calendar::{weekday_from_index, weekday_index};
use rota_domain::rules::{
    COOLDOWN_DAYS, COVERING_DAYS, DAY_OF_MONTH, EXCLUSIVE_WITHIN_TASK, REQUIRES_OFFICE_DAYS,
    REQUIRES_REST, WEEK_START_DAY,
};
use rota_domain::{
    DayOfMonth, DomainError, RuleValue, ShiftDescriptor, ShiftRule, ShiftTable, TaskClass,
    TaskDefinition,
};
use std::collections::{BTreeMap, BTreeSet};
use time::Weekday;
use tracing::warn;

/// Settings shared by every cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSettings {
    /// Availability mode.
    pub class: TaskClass,
    /// Whether a placement in any other family that day blocks the member.
    pub cross_task_exclusive: bool,
    /// Cooldown window for cooldown-sensitive shifts.
    pub cooldown_days: u32,
    /// Concurrent roles per occurrence (at least 1).
    pub required_count: usize,
}

/// Weekly partitioning settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSettings {
    /// Weekday on which each week starts.
    pub start: Weekday,
    /// Weekday numbers (0 = Monday) the duty covers.
    pub covering_days: BTreeSet<u8>,
}

fn record_fallback(audit: &mut AuditLog, task: &str, key: &str, problem: &str, default: &str) {
    warn!(task, key, problem, default, "Rule fallback applied");
    audit.record_fallback(format!(
        "Task '{task}': {key} {problem}, using {default}"
    ));
}

fn resolve_or<T>(
    value: RuleValue<T>,
    default: T,
    describe: &str,
    key: &str,
    task: &TaskDefinition,
    audit: &mut AuditLog,
    log_missing: bool,
) -> T {
    match value {
        RuleValue::Present(value) => value,
        RuleValue::Missing => {
            if log_missing {
                record_fallback(audit, &task.name, key, "missing", describe);
            }
            default
        }
        RuleValue::Malformed(reason) => {
            record_fallback(
                audit,
                &task.name,
                key,
                &format!("malformed ({reason})"),
                describe,
            );
            default
        }
    }
}

/// Resolves the cadence-independent settings of `task`.
pub fn resolve_settings(
    task: &TaskDefinition,
    config: &SchedulingConfig,
    audit: &mut AuditLog,
) -> TaskSettings {
    let enforce_pattern: bool = resolve_or(
        task.rules.bool(REQUIRES_OFFICE_DAYS),
        true,
        "true",
        REQUIRES_OFFICE_DAYS,
        task,
        audit,
        false,
    );
    let within_task: bool = resolve_or(
        task.rules.bool(EXCLUSIVE_WITHIN_TASK),
        false,
        "false",
        EXCLUSIVE_WITHIN_TASK,
        task,
        audit,
        false,
    );
    let cooldown_days: u32 = resolve_or(
        task.rules.count(COOLDOWN_DAYS),
        config.cooldown_days,
        &config.cooldown_days.to_string(),
        COOLDOWN_DAYS,
        task,
        audit,
        false,
    );

    let required_count: usize = if task.required_count == 0 {
        record_fallback(audit, &task.name, "required_count", "is 0", "1");
        1
    } else {
        task.required_count
    };

    TaskSettings {
        class: if enforce_pattern {
            TaskClass::PatternEnforced
        } else {
            TaskClass::PatternExempt
        },
        cross_task_exclusive: !within_task,
        cooldown_days,
        required_count,
    }
}

/// Resolves the week start and covering days of a weekly task.
///
/// A missing or malformed week start falls back to the configured default
/// and is recorded. Covering days default to the whole week.
pub fn resolve_week(
    task: &TaskDefinition,
    config: &SchedulingConfig,
    audit: &mut AuditLog,
) -> WeekSettings {
    let default_start: Weekday = config.week_start();
    let start: Weekday = resolve_or(
        task.rules.weekday(WEEK_START_DAY),
        default_start,
        &format!("{} ({default_start})", weekday_index(default_start)),
        WEEK_START_DAY,
        task,
        audit,
        true,
    );
    let covering_days: BTreeSet<u8> = resolve_or(
        task.rules.weekdays(COVERING_DAYS),
        (0..7).collect(),
        "every day",
        COVERING_DAYS,
        task,
        audit,
        false,
    );

    WeekSettings {
        start,
        covering_days,
    }
}

/// Resolves the monthly anchor, defaulting to the 1st.
pub fn resolve_day_of_month(task: &TaskDefinition, audit: &mut AuditLog) -> DayOfMonth {
    resolve_or(
        task.rules.day_of_month(DAY_OF_MONTH),
        DayOfMonth::Fixed(1),
        "1",
        DAY_OF_MONTH,
        task,
        audit,
        true,
    )
}

fn apply_shift_rules(
    shift: &ShiftDescriptor,
    overrides: &[ShiftRule],
    task_rest: Option<bool>,
) -> ShiftDescriptor {
    let rule: Option<&ShiftRule> = overrides.iter().find(|rule| rule.label == shift.label);
    let mut resolved: ShiftDescriptor = shift.clone();

    resolved.rest_required = rule
        .and_then(|rule| rule.requires_rest)
        .or(task_rest)
        .unwrap_or(shift.rest_required);
    resolved.cooldown_sensitive = rule
        .and_then(|rule| rule.cooldown)
        .unwrap_or(shift.cooldown_sensitive);

    resolved
}

/// Builds the weekday shift table for a daily task.
///
/// An explicit table on the definition is used as is. Otherwise the flat
/// shift list is distributed over the week, restricted per weekday by the
/// `weekday_shifts` rule where present. A task with neither gets a single
/// `Shift` slot staffed by `required_count` members. Per-shift rest and
/// cooldown overrides from the rule bag apply in every case.
///
/// # Errors
///
/// Returns an error if the resulting table fails validation.
pub fn resolve_shift_table(
    task: &TaskDefinition,
    settings: &TaskSettings,
    audit: &mut AuditLog,
) -> Result<ShiftTable, DomainError> {
    let overrides: Vec<ShiftRule> = resolve_or(
        task.rules.shift_rules(),
        Vec::new(),
        "no per-shift rules",
        "shifts",
        task,
        audit,
        false,
    );
    let task_rest: Option<bool> = match task.rules.bool(REQUIRES_REST) {
        RuleValue::Present(value) => Some(value),
        RuleValue::Missing => None,
        RuleValue::Malformed(reason) => {
            record_fallback(
                audit,
                &task.name,
                REQUIRES_REST,
                &format!("malformed ({reason})"),
                "per-shift flags",
            );
            None
        }
    };

    if let Some(table) = &task.shift_table {
        let days: Vec<Vec<ShiftDescriptor>> = (0..7)
            .filter_map(weekday_from_index)
            .map(|weekday| {
                table
                    .for_weekday(weekday)
                    .iter()
                    .map(|shift| apply_shift_rules(shift, &overrides, task_rest))
                    .collect()
            })
            .collect();
        return ShiftTable::from_weekdays(days);
    }

    let fallback: Vec<ShiftDescriptor>;
    let declared: &[ShiftDescriptor] = if task.shifts.is_empty() {
        record_fallback(
            audit,
            &task.name,
            "shifts",
            "not defined",
            &format!("a single 'Shift' slot of {}", settings.required_count),
        );
        fallback = vec![
            ShiftDescriptor::new("Shift", "00:00", "23:59")
                .with_required_count(settings.required_count),
        ];
        &fallback
    } else {
        &task.shifts
    };
    let shifts: Vec<ShiftDescriptor> = declared
        .iter()
        .map(|shift| apply_shift_rules(shift, &overrides, task_rest))
        .collect();

    let by_weekday: BTreeMap<u8, Vec<String>> = resolve_or(
        task.rules.weekday_shifts(),
        BTreeMap::new(),
        "every shift every day",
        "weekday_shifts",
        task,
        audit,
        false,
    );
    for label in by_weekday.values().flatten() {
        if !shifts.iter().any(|shift| &shift.label == label) {
            audit.record_fallback(format!(
                "Task '{}': weekday_shifts names unknown shift '{label}', ignoring it",
                task.name
            ));
        }
    }

    let days: Vec<Vec<ShiftDescriptor>> = (0..7u8)
        .map(|day| match by_weekday.get(&day) {
            Some(labels) => shifts
                .iter()
                .filter(|shift| labels.contains(&shift.label))
                .cloned()
                .collect(),
            None => shifts.clone(),
        })
        .collect();

    ShiftTable::from_weekdays(days)
}
