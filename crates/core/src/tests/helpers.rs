// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GenerationOutcome, GenerationRequest, Scheduler, SchedulingConfig};
use rota_domain::{Assignment, BuiltInTask, DateRange, Member, TaskId};
use time::{Date, Month};

pub const NAMES: [&str; 6] = ["Alice", "Bob", "Cara", "Dan", "Eve", "Finn"];

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// 2026-01-05 (Monday) through 2026-01-11 (Sunday).
pub fn first_full_week() -> DateRange {
    DateRange::new(
        date(2026, Month::January, 5),
        date(2026, Month::January, 11),
    )
    .unwrap()
}

pub fn range(start: Date, end: Date) -> DateRange {
    DateRange::new(start, end).unwrap()
}

/// `size` always-available members with ids `m1`, `m2`, ...
pub fn team(size: usize) -> Vec<Member> {
    (0..size)
        .map(|i| Member::new(&format!("m{}", i + 1), NAMES[i % NAMES.len()]).always_available())
        .collect()
}

pub fn generate(request: &GenerationRequest) -> GenerationOutcome {
    Scheduler::new(SchedulingConfig::default())
        .generate(request)
        .unwrap()
}

pub fn is_monitoring(assignment: &Assignment) -> bool {
    matches!(
        assignment.task,
        TaskId::BuiltIn(BuiltInTask::MonitoringMorning | BuiltInTask::MonitoringMidnight)
    )
}

pub fn heavy() -> TaskId {
    TaskId::BuiltIn(BuiltInTask::MonitoringMidnight)
}

pub fn warnings(outcome: &GenerationOutcome) -> Vec<String> {
    outcome
        .audit
        .lines()
        .into_iter()
        .filter(|line| line.starts_with("WARNING: "))
        .collect()
}
