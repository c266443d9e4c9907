// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{date, generate, heavy, range};
use crate::{GenerationOutcome, GenerationRequest, SchedulingConfig, default_tasks};
use rota_domain::calendar::last_day_of_month;
use rota_domain::{
    Assignment, BuiltInTask, Cadence, DateRange, Member, MemberId, RuleBag, TaskClass,
    TaskDefinition, TaskId, is_available, rest_date,
};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use time::{Date, Month, Weekday};

const CLOSE: &str = "Month End Close";

fn mixed_team() -> Vec<Member> {
    vec![
        Member::new("m1", "Alice").always_available(),
        Member::new("m2", "Bob").always_available(),
        Member::new("m3", "Cara").with_weekly_pattern(0..6),
        Member::new("m4", "Dan")
            .with_weekly_pattern(0..6)
            .with_unavailable_range(range(
                date(2026, Month::January, 12),
                date(2026, Month::January, 16),
            )),
        Member::new("m5", "Eve"),
        Member::new("m6", "Finn")
            .with_weekly_pattern(0..6)
            .with_unavailable_date(date(2026, Month::January, 21)),
        Member::new("m7", "Gus").always_available(),
    ]
}

fn request() -> GenerationRequest {
    let close: TaskDefinition = TaskDefinition::new(CLOSE, Cadence::Monthly)
        .with_required_count(2)
        .with_role_labels(&["Preparer", "Reviewer"])
        .with_rules(RuleBag::new().with("day_of_month", json!("EOM")));
    let mut tasks: Vec<TaskDefinition> = default_tasks(&SchedulingConfig::default()).unwrap();
    tasks.push(close);

    GenerationRequest::new(
        mixed_team(),
        range(date(2026, Month::January, 5), date(2026, Month::March, 1)),
    )
    .with_tasks(tasks)
}

fn family(task: &TaskId) -> String {
    match task {
        TaskId::BuiltIn(BuiltInTask::MonitoringMorning | BuiltInTask::MonitoringMidnight) => {
            String::from("MONITORING")
        }
        TaskId::BuiltIn(BuiltInTask::ReviewMaker | BuiltInTask::ReviewChecker) => {
            String::from("TICKET_REVIEW")
        }
        TaskId::Custom(name) => name.clone(),
    }
}

fn class(task: &TaskId) -> TaskClass {
    if family(task) == "MONITORING" {
        TaskClass::PatternExempt
    } else {
        TaskClass::PatternEnforced
    }
}

#[test]
fn test_every_assignment_respects_availability() {
    let request: GenerationRequest = request();
    let outcome: GenerationOutcome = generate(&request);
    let members: BTreeMap<&MemberId, &Member> =
        request.members.iter().map(|m| (&m.id, m)).collect();

    assert!(!outcome.schedule.is_empty());
    for assignment in &outcome.schedule.assignments {
        let member: &Member = members[&assignment.member];
        assert!(
            is_available(member, assignment.date, class(&assignment.task)),
            "{} unavailable for {} on {}",
            assignment.member,
            assignment.task,
            assignment.date
        );
    }
}

#[test]
fn test_no_double_booking_within_a_family() {
    let outcome: GenerationOutcome = generate(&request());
    let mut seen: BTreeSet<(MemberId, Date, String)> = BTreeSet::new();

    for assignment in &outcome.schedule.assignments {
        assert!(
            seen.insert((
                assignment.member.clone(),
                assignment.date,
                family(&assignment.task)
            )),
            "{} double-booked in {} on {}",
            assignment.member,
            family(&assignment.task),
            assignment.date
        );
    }
}

#[test]
fn test_no_assignment_on_own_rest_date() {
    let outcome: GenerationOutcome = generate(&request());

    for earned in outcome.schedule.for_task(&heavy()) {
        let Some(rest) = rest_date(earned.date) else {
            continue;
        };
        let working: Vec<&Assignment> = outcome
            .schedule
            .for_date(rest)
            .filter(|a| a.member == earned.member)
            .collect();
        assert!(
            working.is_empty(),
            "{} assigned on rest date {rest}: {working:?}",
            earned.member
        );
    }
}

#[test]
fn test_generation_is_deterministic() {
    let request: GenerationRequest = request();
    let first: GenerationOutcome = generate(&request);
    let second: GenerationOutcome = generate(&request);

    assert_eq!(first, second);
    assert_eq!(first.audit.render(), second.audit.render());
    assert_eq!(
        serde_json::to_string(&first.schedule).unwrap(),
        serde_json::to_string(&second.schedule).unwrap()
    );
}

#[test]
fn test_weekly_role_holders_are_distinct() {
    let outcome: GenerationOutcome = generate(&request());
    let mut holders: BTreeMap<Date, Vec<&MemberId>> = BTreeMap::new();

    for assignment in &outcome.schedule.assignments {
        if family(&assignment.task) == "TICKET_REVIEW" {
            assert!(assignment.week_anchor.is_some());
            holders
                .entry(assignment.date)
                .or_default()
                .push(&assignment.member);
        }
    }

    assert!(!holders.is_empty());
    for (day, members) in holders {
        let distinct: BTreeSet<&&MemberId> = members.iter().collect();
        assert_eq!(members.len(), 2, "roles on {day}");
        assert_eq!(distinct.len(), 2, "distinct holders on {day}");
    }
}

#[test]
fn test_month_end_occurrences_stay_in_range_on_weekdays() {
    let request: GenerationRequest = request();
    let outcome: GenerationOutcome = generate(&request);
    let requested: DateRange = request.range;
    let close: TaskId = TaskId::Custom(String::from(CLOSE));

    let dates: BTreeSet<Date> = outcome.schedule.for_task(&close).map(|a| a.date).collect();
    assert!(!dates.is_empty());
    for day in dates {
        assert!(requested.contains(day));
        assert!(!matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday));
        let last: Date = last_day_of_month(day.year(), day.month()).unwrap();
        // Only weekend adjustment separates an occurrence from month end
        assert!((last - day).whole_days() <= 2 || day.day() <= 2);
    }
}

#[test]
fn test_month_end_holders_hold_nothing_else_that_day() {
    let outcome: GenerationOutcome = generate(&request());
    let close: TaskId = TaskId::Custom(String::from(CLOSE));

    let holders: Vec<&Assignment> = outcome.schedule.for_task(&close).collect();
    assert!(!holders.is_empty());
    for held in holders {
        let others: Vec<&Assignment> = outcome
            .schedule
            .for_date(held.date)
            .filter(|a| a.member == held.member && a.task != close)
            .collect();
        assert!(
            others.is_empty(),
            "{} also placed on {}: {others:?}",
            held.member,
            held.date
        );
    }
}
