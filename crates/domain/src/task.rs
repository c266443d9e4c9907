// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::weekday_index;
use crate::error::DomainError;
use crate::rules::RuleBag;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Weekday;

/// Fairness-tracked roles of the two built-in task families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuiltInTask {
    /// Morning reporter of the around-the-clock monitoring duty.
    #[serde(rename = "MONITORING_MORNING")]
    MonitoringMorning,
    /// Midday-and-night reporter of the monitoring duty (the heavy role).
    #[serde(rename = "MONITORING_MIDNIGHT")]
    MonitoringMidnight,
    /// Maker of the weekly ticket review duty.
    #[serde(rename = "REVIEW_MAKER")]
    ReviewMaker,
    /// Checker of the weekly ticket review duty.
    #[serde(rename = "REVIEW_CHECKER")]
    ReviewChecker,
}

impl BuiltInTask {
    /// Every built-in role, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::MonitoringMorning,
        Self::MonitoringMidnight,
        Self::ReviewMaker,
        Self::ReviewChecker,
    ];

    /// Returns the canonical tag for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MonitoringMorning => "MONITORING_MORNING",
            Self::MonitoringMidnight => "MONITORING_MIDNIGHT",
            Self::ReviewMaker => "REVIEW_MAKER",
            Self::ReviewChecker => "REVIEW_CHECKER",
        }
    }

    /// Parses a canonical tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|task| task.as_str() == tag)
    }
}

/// Identifies what a slot is counted against in the fairness ledger.
///
/// Built-in roles carry fixed tags; configurable tasks are identified by
/// their free-form name. A custom name equal to a built-in tag resolves to
/// the built-in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TaskId {
    /// One of the built-in roles.
    BuiltIn(BuiltInTask),
    /// A configurable task, by name.
    Custom(String),
}

impl TaskId {
    /// Creates a `TaskId` from its canonical string.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        BuiltInTask::from_tag(value).map_or_else(|| Self::Custom(value.to_string()), Self::BuiltIn)
    }

    /// Returns the canonical string for this identifier.
    #[must_use]
    pub fn canonical(&self) -> &str {
        match self {
            Self::BuiltIn(task) => task.as_str(),
            Self::Custom(name) => name,
        }
    }

    /// Returns whether this identifies a built-in role.
    #[must_use]
    pub const fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn(_))
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.canonical().to_string()
    }
}

impl From<BuiltInTask> for TaskId {
    fn from(value: BuiltInTask) -> Self {
        Self::BuiltIn(value)
    }
}

/// How often a task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Every day, one or more shifts per day.
    Daily,
    /// One selection per week, expanded over the covering days.
    Weekly,
    /// One occurrence per calendar month.
    Monthly,
}

impl Cadence {
    /// Returns the lowercase tag for this cadence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Cadence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(DomainError::InvalidCadence(s.to_string())),
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which availability mode applies to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskClass {
    /// Around-the-clock duty: the weekly pattern is ignored.
    PatternExempt,
    /// The member must be on a pattern weekday.
    PatternEnforced,
}

const fn one() -> usize {
    1
}

/// A shift within a daily duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDescriptor {
    /// Shift label, recorded on each assignment.
    pub label: String,
    /// Nominal start time (`HH:MM`).
    pub start_time: String,
    /// Nominal end time (`HH:MM`).
    pub end_time: String,
    /// Number of members staffing the shift concurrently.
    #[serde(default = "one")]
    pub required_count: usize,
    /// Whether holding this shift earns a rest date.
    #[serde(default)]
    pub rest_required: bool,
    /// Whether this shift is subject to the cooldown window.
    #[serde(default)]
    pub cooldown_sensitive: bool,
    /// Built-in role the shift is counted against, if any.
    #[serde(default)]
    pub role: Option<BuiltInTask>,
}

impl ShiftDescriptor {
    /// Creates a single-seat shift with no rest or cooldown rules.
    #[must_use]
    pub fn new(label: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            label: label.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            required_count: 1,
            rest_required: false,
            cooldown_sensitive: false,
            role: None,
        }
    }

    /// Sets the number of concurrent seats.
    #[must_use]
    pub const fn with_required_count(mut self, count: usize) -> Self {
        self.required_count = count;
        self
    }

    /// Marks the shift as rest-triggering.
    #[must_use]
    pub const fn requiring_rest(mut self) -> Self {
        self.rest_required = true;
        self
    }

    /// Marks the shift as cooldown-sensitive.
    #[must_use]
    pub const fn with_cooldown(mut self) -> Self {
        self.cooldown_sensitive = true;
        self
    }

    /// Counts the shift against a built-in role.
    #[must_use]
    pub const fn with_role(mut self, role: BuiltInTask) -> Self {
        self.role = Some(role);
        self
    }

    /// Validates the shift descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The label is empty
    /// - The required count is zero
    /// - Either nominal time is not `HH:MM`
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.label.trim().is_empty() {
            return Err(DomainError::InvalidShift {
                label: self.label.clone(),
                reason: String::from("label must not be empty"),
            });
        }
        if self.required_count == 0 {
            return Err(DomainError::InvalidShift {
                label: self.label.clone(),
                reason: String::from("required count must be at least 1"),
            });
        }
        parse_shift_time(&self.start_time)?;
        parse_shift_time(&self.end_time)?;
        Ok(())
    }
}

/// Parses a nominal shift time in `HH:MM` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTime` if the value is not a valid time.
pub fn parse_shift_time(value: &str) -> Result<time::Time, DomainError> {
    time::Time::parse(
        value.trim(),
        time::macros::format_description!("[hour]:[minute]"),
    )
    .map_err(|_| DomainError::InvalidShiftTime(value.to_string()))
}

/// Weekday-indexed shift lists for a daily duty.
///
/// Built once from configuration and treated as immutable data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTable {
    days: Vec<Vec<ShiftDescriptor>>,
}

impl ShiftTable {
    /// Creates a table with the same shift list on every weekday.
    ///
    /// # Errors
    ///
    /// Returns an error if any shift is invalid.
    pub fn uniform(shifts: Vec<ShiftDescriptor>) -> Result<Self, DomainError> {
        Self::from_weekdays(vec![shifts; 7])
    }

    /// Creates a table from seven lists, Monday first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The number of lists is not seven
    /// - Any shift is invalid
    pub fn from_weekdays(days: Vec<Vec<ShiftDescriptor>>) -> Result<Self, DomainError> {
        if days.len() != 7 {
            return Err(DomainError::InvalidShiftTable { days: days.len() });
        }
        for shift in days.iter().flatten() {
            shift.validate()?;
        }
        Ok(Self { days })
    }

    /// Returns the ordered shifts for `weekday`.
    #[must_use]
    pub fn for_weekday(&self, weekday: Weekday) -> &[ShiftDescriptor] {
        self.days
            .get(usize::from(weekday_index(weekday)))
            .map_or(&[], Vec::as_slice)
    }
}

/// A recurring duty to be allocated.
///
/// The two built-in families and every configurable task share this
/// shape. The `name` doubles as the family key used for same-day
/// exclusivity and member subsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task family name.
    pub name: String,
    /// Recurrence cadence.
    pub cadence: Cadence,
    /// Concurrent roles per occurrence (weekly/monthly).
    #[serde(default = "one")]
    pub required_count: usize,
    /// Ordered role labels.
    #[serde(default)]
    pub role_labels: Vec<String>,
    /// Cadence-specific parameters.
    #[serde(default)]
    pub rules: RuleBag,
    /// Shift descriptors (daily cadence).
    #[serde(default)]
    pub shifts: Vec<ShiftDescriptor>,
    /// Explicit weekday shift table; takes precedence over `shifts`.
    #[serde(default)]
    pub shift_table: Option<ShiftTable>,
    /// Built-in roles, in role order (weekly built-in family).
    #[serde(default)]
    pub role_tasks: Vec<BuiltInTask>,
}

impl TaskDefinition {
    /// Creates a single-role task definition with no rules.
    #[must_use]
    pub fn new(name: &str, cadence: Cadence) -> Self {
        Self {
            name: name.to_string(),
            cadence,
            required_count: 1,
            role_labels: Vec::new(),
            rules: RuleBag::new(),
            shifts: Vec::new(),
            shift_table: None,
            role_tasks: Vec::new(),
        }
    }

    /// Sets the number of concurrent roles.
    #[must_use]
    pub const fn with_required_count(mut self, count: usize) -> Self {
        self.required_count = count;
        self
    }

    /// Sets the role labels.
    #[must_use]
    pub fn with_role_labels(mut self, labels: &[&str]) -> Self {
        self.role_labels = labels.iter().map(|label| (*label).to_string()).collect();
        self
    }

    /// Replaces the rule bag.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleBag) -> Self {
        self.rules = rules;
        self
    }

    /// Appends a shift descriptor.
    #[must_use]
    pub fn with_shift(mut self, shift: ShiftDescriptor) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Sets an explicit weekday shift table.
    #[must_use]
    pub fn with_shift_table(mut self, table: ShiftTable) -> Self {
        self.shift_table = Some(table);
        self
    }

    /// Sets the built-in roles.
    #[must_use]
    pub fn with_role_tasks(mut self, roles: &[BuiltInTask]) -> Self {
        self.role_tasks = roles.to_vec();
        self
    }

    /// Returns the label for role `index` (0-based).
    ///
    /// Excess labels are never used; missing labels read `Role N`.
    #[must_use]
    pub fn role_label(&self, index: usize) -> String {
        self.role_labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Role {}", index + 1))
    }

    /// Returns the fairness identifier for role `index`.
    #[must_use]
    pub fn role_key(&self, index: usize) -> TaskId {
        self.role_tasks
            .get(index)
            .map_or_else(|| self.custom_key(), |role| TaskId::BuiltIn(*role))
    }

    /// Returns the fairness identifier for a shift of this task.
    #[must_use]
    pub fn shift_key(&self, shift: &ShiftDescriptor) -> TaskId {
        shift
            .role
            .map_or_else(|| self.custom_key(), TaskId::BuiltIn)
    }

    fn custom_key(&self) -> TaskId {
        TaskId::parse(&self.name)
    }
}
