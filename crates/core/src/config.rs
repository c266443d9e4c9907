// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine-wide scheduling configuration.

use rota_domain::calendar::weekday_from_index;
use rota_domain::parse_shift_time;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Weekday;

/// Errors raised while loading or validating a `SchedulingConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Failed to parse scheduling config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured week start is not a weekday number.
    #[error("Invalid week_start_day {0}. Must be between 0 and 6")]
    InvalidWeekStart(u8),
    /// A monitoring window time is not `HH:MM`.
    #[error("Invalid {window} window time '{value}'. Expected HH:MM")]
    InvalidWindow {
        /// The window name.
        window: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Nominal start and end of a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Start time (`HH:MM`).
    pub start: String,
    /// End time (`HH:MM`).
    pub end: String,
}

impl ShiftWindow {
    /// Creates a new `ShiftWindow`.
    #[must_use]
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

fn default_morning() -> ShiftWindow {
    ShiftWindow::new("06:00", "08:30")
}

fn default_midday() -> ShiftWindow {
    ShiftWindow::new("08:30", "14:30")
}

fn default_night() -> ShiftWindow {
    ShiftWindow::new("14:30", "22:00")
}

fn default_overnight() -> ShiftWindow {
    ShiftWindow::new("22:00", "06:00")
}

/// Shift windows of the built-in monitoring duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringWindows {
    /// Early shift, every day.
    #[serde(default = "default_morning")]
    pub morning: ShiftWindow,
    /// Midday shift. On weekdays it is merged with the night shift.
    #[serde(default = "default_midday")]
    pub midday: ShiftWindow,
    /// Night shift.
    #[serde(default = "default_night")]
    pub night: ShiftWindow,
    /// Saturday overnight shift.
    #[serde(default = "default_overnight")]
    pub overnight: ShiftWindow,
}

impl Default for MonitoringWindows {
    fn default() -> Self {
        Self {
            morning: default_morning(),
            midday: default_midday(),
            night: default_night(),
            overnight: default_overnight(),
        }
    }
}

const fn default_cooldown_days() -> u32 {
    2
}

const fn default_true() -> bool {
    true
}

const fn default_fairness_window_days() -> u32 {
    90
}

/// Configuration shared by every generation run.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Days after a cooldown-sensitive shift during which the same role
    /// cannot be held again.
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: u32,
    /// Whether rest-triggering shifts block the member's rest date.
    #[serde(default = "default_true")]
    pub rest_rule_enabled: bool,
    /// Default weekday (0 = Monday) on which weekly duties start.
    #[serde(default)]
    pub week_start_day: u8,
    /// Rolling window used when rebuilding fairness counts from history.
    #[serde(default = "default_fairness_window_days")]
    pub fairness_window_days: u32,
    /// Built-in monitoring shift windows.
    #[serde(default)]
    pub monitoring: MonitoringWindows,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            cooldown_days: default_cooldown_days(),
            rest_rule_enabled: true,
            week_start_day: 0,
            fairness_window_days: default_fairness_window_days(),
            monitoring: MonitoringWindows::default(),
        }
    }
}

impl SchedulingConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this type or
    /// fails `validate`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `week_start_day` is outside 0..=6
    /// - Any monitoring window time is not `HH:MM`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if weekday_from_index(self.week_start_day).is_none() {
            return Err(ConfigError::InvalidWeekStart(self.week_start_day));
        }

        let windows: [(&'static str, &ShiftWindow); 4] = [
            ("morning", &self.monitoring.morning),
            ("midday", &self.monitoring.midday),
            ("night", &self.monitoring.night),
            ("overnight", &self.monitoring.overnight),
        ];
        for (window, times) in windows {
            for value in [&times.start, &times.end] {
                if parse_shift_time(value).is_err() {
                    return Err(ConfigError::InvalidWindow {
                        window,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the default week start as a `Weekday`.
    ///
    /// Falls back to Monday when the configured value is out of range.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        match weekday_from_index(self.week_start_day) {
            Some(weekday) => weekday,
            None => Weekday::Monday,
        }
    }
}
