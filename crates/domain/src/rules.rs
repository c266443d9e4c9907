// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cadence-specific task parameters.
//!
//! Task definitions carry an opaque JSON object of rules supplied by the
//! task-type editor. Every lookup reports whether the key was present,
//! missing or malformed so the expanders can apply and record a fallback
//! instead of aborting a run.

use crate::calendar::weekday_from_index;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use time::Weekday;

/// Rule key: weekday (0-6) on which weekly duties start.
pub const WEEK_START_DAY: &str = "week_start_day";
/// Rule key: weekdays (0-6) a weekly duty covers.
pub const COVERING_DAYS: &str = "covering_days";
/// Rule key: day of month (1-31) or `"EOM"` for monthly duties.
pub const DAY_OF_MONTH: &str = "day_of_month";
/// Rule key: whether the member's weekly pattern is enforced.
pub const REQUIRES_OFFICE_DAYS: &str = "requires_office_days";
/// Rule key: whether same-day exclusivity is scoped to the task's own
/// family instead of the whole run.
pub const EXCLUSIVE_WITHIN_TASK: &str = "exclusive_within_task";
/// Rule key: cooldown window in days for cooldown-sensitive shifts.
pub const COOLDOWN_DAYS: &str = "cooldown_days";
/// Rule key: task-level rest flag for shifts without their own rule.
pub const REQUIRES_REST: &str = "requires_rest";
/// Rule key: per-shift flag overrides.
pub const SHIFTS: &str = "shifts";
/// Rule key: weekday (as string "0".."6") to shift labels.
pub const WEEKDAY_SHIFTS: &str = "weekday_shifts";

/// Outcome of a typed rule lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue<T> {
    /// The key was present and well-formed.
    Present(T),
    /// The key was absent.
    Missing,
    /// The key was present but could not be interpreted.
    Malformed(String),
}

impl<T> RuleValue<T> {
    /// Returns the present value or `default` otherwise.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Missing | Self::Malformed(_) => default,
        }
    }

    /// Returns whether the value was present and well-formed.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Day-of-month anchor for monthly duties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfMonth {
    /// A fixed calendar day (1-31). Days beyond a month's length clamp to
    /// its last day.
    Fixed(u8),
    /// The true last calendar day of each month.
    EndOfMonth,
}

/// Per-shift overrides carried in the rule bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRule {
    /// Label of the shift the rule applies to.
    pub label: String,
    /// Rest flag override.
    #[serde(default)]
    pub requires_rest: Option<bool>,
    /// Cooldown flag override.
    #[serde(default)]
    pub cooldown: Option<bool>,
}

/// The opaque rule bag attached to a task definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBag {
    values: Map<String, Value>,
}

impl RuleBag {
    /// Creates an empty rule bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bag with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Returns the raw value for `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Looks up a boolean rule.
    #[must_use]
    pub fn bool(&self, key: &str) -> RuleValue<bool> {
        match self.values.get(key) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(Value::Bool(value)) => RuleValue::Present(*value),
            Some(other) => RuleValue::Malformed(format!("expected boolean, found {other}")),
        }
    }

    /// Looks up a non-negative integer rule.
    #[must_use]
    pub fn count(&self, key: &str) -> RuleValue<u32> {
        match self.values.get(key) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(value) => value
                .as_u64()
                .and_then(|raw| u32::try_from(raw).ok())
                .map_or_else(
                    || RuleValue::Malformed(format!("expected non-negative integer, found {value}")),
                    RuleValue::Present,
                ),
        }
    }

    /// Looks up a single weekday (0 = Monday .. 6 = Sunday).
    #[must_use]
    pub fn weekday(&self, key: &str) -> RuleValue<Weekday> {
        match self.values.get(key) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(value) => parse_weekday(value).map_or_else(
                || RuleValue::Malformed(format!("expected weekday 0-6, found {value}")),
                RuleValue::Present,
            ),
        }
    }

    /// Looks up a set of weekday numbers.
    #[must_use]
    pub fn weekdays(&self, key: &str) -> RuleValue<BTreeSet<u8>> {
        match self.values.get(key) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(Value::Array(items)) => {
                let mut days: BTreeSet<u8> = BTreeSet::new();
                for item in items {
                    let Some(day) = parse_weekday_index(item) else {
                        return RuleValue::Malformed(format!(
                            "expected weekday 0-6, found {item}"
                        ));
                    };
                    days.insert(day);
                }
                if days.is_empty() {
                    return RuleValue::Malformed(String::from("weekday list is empty"));
                }
                RuleValue::Present(days)
            }
            Some(other) => RuleValue::Malformed(format!("expected weekday list, found {other}")),
        }
    }

    /// Looks up the monthly anchor (`1`-`31` or `"EOM"`, case-insensitive).
    #[must_use]
    pub fn day_of_month(&self, key: &str) -> RuleValue<DayOfMonth> {
        match self.values.get(key) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(Value::String(text)) if text.trim().eq_ignore_ascii_case("eom") => {
                RuleValue::Present(DayOfMonth::EndOfMonth)
            }
            Some(Value::String(text)) => text.trim().parse::<u8>().ok().map_or_else(
                || RuleValue::Malformed(format!("expected 1-31 or EOM, found '{text}'")),
                |day| fixed_day(day, text),
            ),
            Some(value) => value
                .as_u64()
                .and_then(|raw| u8::try_from(raw).ok())
                .map_or_else(
                    || RuleValue::Malformed(format!("expected 1-31 or EOM, found {value}")),
                    |day| fixed_day(day, &value.to_string()),
                ),
        }
    }

    /// Looks up per-shift overrides.
    #[must_use]
    pub fn shift_rules(&self) -> RuleValue<Vec<ShiftRule>> {
        match self.values.get(SHIFTS) {
            None | Some(Value::Null) => RuleValue::Missing,
            Some(value) => serde_json::from_value::<Vec<ShiftRule>>(value.clone())
                .map_or_else(
                    |err| RuleValue::Malformed(err.to_string()),
                    RuleValue::Present,
                ),
        }
    }

    /// Looks up the weekday-to-shift-labels mapping.
    #[must_use]
    pub fn weekday_shifts(&self) -> RuleValue<BTreeMap<u8, Vec<String>>> {
        let Some(raw) = self.values.get(WEEKDAY_SHIFTS) else {
            return RuleValue::Missing;
        };
        let Value::Object(entries) = raw else {
            return RuleValue::Malformed(format!("expected object, found {raw}"));
        };

        let mut table: BTreeMap<u8, Vec<String>> = BTreeMap::new();
        for (key, labels) in entries {
            let Some(day) = key.trim().parse::<u8>().ok().filter(|day| *day <= 6) else {
                return RuleValue::Malformed(format!("'{key}' is not a weekday 0-6"));
            };
            let Ok(labels) = serde_json::from_value::<Vec<String>>(labels.clone()) else {
                return RuleValue::Malformed(format!("labels for weekday {day} are not strings"));
            };
            table.insert(day, labels);
        }
        RuleValue::Present(table)
    }
}

impl From<Map<String, Value>> for RuleBag {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

fn fixed_day(day: u8, original: &str) -> RuleValue<DayOfMonth> {
    if (1..=31).contains(&day) {
        RuleValue::Present(DayOfMonth::Fixed(day))
    } else {
        RuleValue::Malformed(format!("day of month {original} is outside 1-31"))
    }
}

fn parse_weekday_index(value: &Value) -> Option<u8> {
    value
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .filter(|day| *day <= 6)
}

fn parse_weekday(value: &Value) -> Option<Weekday> {
    parse_weekday_index(value).and_then(weekday_from_index)
}
