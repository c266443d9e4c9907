// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The two built-in duty families.
//!
//! Both are ordinary `TaskDefinition`s so the expanders treat them the same
//! way as task types supplied by callers.

use crate::config::{MonitoringWindows, SchedulingConfig};
use rota_domain::rules::{
    COVERING_DAYS, EXCLUSIVE_WITHIN_TASK, REQUIRES_OFFICE_DAYS, WEEK_START_DAY,
};
use rota_domain::{
    BuiltInTask, Cadence, DomainError, RuleBag, ShiftDescriptor, ShiftTable, TaskDefinition,
};
use serde_json::{Value, json};

/// Family name of the built-in daily monitoring duty.
pub const MONITORING_DUTY: &str = "MONITORING";
/// Family name of the built-in weekly ticket review duty.
pub const TICKET_REVIEW_DUTY: &str = "TICKET_REVIEW";

/// Builds the daily monitoring duty.
///
/// Weekdays carry a merged midday-and-night shift plus a morning shift.
/// Saturdays split the day into four shifts and Sundays into three. The
/// rest-triggering night role is listed first on every day because its
/// candidate pool is the narrowest.
///
/// # Errors
///
/// Returns an error if the configured windows produce an invalid shift.
pub fn monitoring_duty(config: &SchedulingConfig) -> Result<TaskDefinition, DomainError> {
    let windows: &MonitoringWindows = &config.monitoring;

    let morning: ShiftDescriptor =
        ShiftDescriptor::new("Morning", &windows.morning.start, &windows.morning.end)
            .with_role(BuiltInTask::MonitoringMorning);
    let midday: ShiftDescriptor =
        ShiftDescriptor::new("Midday", &windows.midday.start, &windows.midday.end)
            .with_role(BuiltInTask::MonitoringMorning);
    let overnight: ShiftDescriptor =
        ShiftDescriptor::new("Overnight", &windows.overnight.start, &windows.overnight.end)
            .with_role(BuiltInTask::MonitoringMorning);
    let merged_night: ShiftDescriptor =
        ShiftDescriptor::new("Midday+Night", &windows.midday.start, &windows.night.end)
            .with_role(BuiltInTask::MonitoringMidnight)
            .requiring_rest()
            .with_cooldown();
    let night: ShiftDescriptor =
        ShiftDescriptor::new("Night", &windows.night.start, &windows.night.end)
            .with_role(BuiltInTask::MonitoringMidnight)
            .requiring_rest()
            .with_cooldown();

    let weekday: Vec<ShiftDescriptor> = vec![merged_night, morning.clone()];
    let saturday: Vec<ShiftDescriptor> = vec![
        night.clone(),
        morning.clone(),
        midday.clone(),
        overnight,
    ];
    let sunday: Vec<ShiftDescriptor> = vec![night, morning, midday];

    let table: ShiftTable = ShiftTable::from_weekdays(vec![
        weekday.clone(),
        weekday.clone(),
        weekday.clone(),
        weekday.clone(),
        weekday,
        saturday,
        sunday,
    ])?;

    let rules: RuleBag = RuleBag::new()
        .with(REQUIRES_OFFICE_DAYS, Value::Bool(false))
        .with(EXCLUSIVE_WITHIN_TASK, Value::Bool(true));

    Ok(TaskDefinition::new(MONITORING_DUTY, Cadence::Daily)
        .with_rules(rules)
        .with_shift_table(table))
}

/// Builds the weekly maker/checker ticket review duty.
///
/// The duty covers Monday through Saturday and starts on the configured
/// week-start day. A reviewer may also hold a monitoring shift that day.
#[must_use]
pub fn ticket_review_duty(config: &SchedulingConfig) -> TaskDefinition {
    let rules: RuleBag = RuleBag::new()
        .with(REQUIRES_OFFICE_DAYS, Value::Bool(true))
        .with(WEEK_START_DAY, json!(config.week_start_day))
        .with(COVERING_DAYS, json!([0, 1, 2, 3, 4, 5]))
        .with(EXCLUSIVE_WITHIN_TASK, Value::Bool(true));

    TaskDefinition::new(TICKET_REVIEW_DUTY, Cadence::Weekly)
        .with_required_count(2)
        .with_role_labels(&["Maker", "Checker"])
        .with_role_tasks(&[BuiltInTask::ReviewMaker, BuiltInTask::ReviewChecker])
        .with_rules(rules)
}

/// Returns the built-in families in scheduling order.
///
/// The daily duty runs first so that its rest-triggering role is not
/// starved by weekly placements.
///
/// # Errors
///
/// Returns an error if the monitoring duty cannot be built.
pub fn default_tasks(config: &SchedulingConfig) -> Result<Vec<TaskDefinition>, DomainError> {
    Ok(vec![monitoring_duty(config)?, ticket_review_duty(config)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rota_domain::{RuleValue, TaskId};
    use time::Weekday;

    fn labels(task: &TaskDefinition, weekday: Weekday) -> Vec<String> {
        task.shift_table
            .as_ref()
            .unwrap()
            .for_weekday(weekday)
            .iter()
            .map(|shift| shift.label.clone())
            .collect()
    }

    #[test]
    fn test_monitoring_table_per_weekday() {
        let task: TaskDefinition = monitoring_duty(&SchedulingConfig::default()).unwrap();

        assert_eq!(labels(&task, Weekday::Tuesday), vec!["Midday+Night", "Morning"]);
        assert_eq!(
            labels(&task, Weekday::Saturday),
            vec!["Night", "Morning", "Midday", "Overnight"]
        );
        assert_eq!(labels(&task, Weekday::Sunday), vec!["Night", "Morning", "Midday"]);
    }

    #[test]
    fn test_monitoring_heavy_role_earns_rest() {
        let task: TaskDefinition = monitoring_duty(&SchedulingConfig::default()).unwrap();
        let table: &ShiftTable = task.shift_table.as_ref().unwrap();
        let heavy: &ShiftDescriptor = &table.for_weekday(Weekday::Monday)[0];

        assert!(heavy.rest_required);
        assert!(heavy.cooldown_sensitive);
        assert_eq!(heavy.start_time, "08:30");
        assert_eq!(heavy.end_time, "22:00");
        assert_eq!(
            task.shift_key(heavy),
            TaskId::BuiltIn(BuiltInTask::MonitoringMidnight)
        );
    }

    #[test]
    fn test_ticket_review_roles() {
        let task: TaskDefinition = ticket_review_duty(&SchedulingConfig::default());

        assert_eq!(task.required_count, 2);
        assert_eq!(task.role_label(0), "Maker");
        assert_eq!(task.role_key(1), TaskId::BuiltIn(BuiltInTask::ReviewChecker));
    }

    #[test]
    fn test_builtins_scope_exclusivity_to_their_own_family() {
        let tasks: Vec<TaskDefinition> = default_tasks(&SchedulingConfig::default()).unwrap();

        for task in &tasks {
            assert_eq!(task.rules.bool(EXCLUSIVE_WITHIN_TASK), RuleValue::Present(true));
        }
    }

    #[test]
    fn test_default_order_runs_daily_first() {
        let tasks: Vec<TaskDefinition> = default_tasks(&SchedulingConfig::default()).unwrap();

        assert_eq!(tasks[0].cadence, Cadence::Daily);
        assert_eq!(tasks[1].cadence, Cadence::Weekly);
    }
}
