// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::MemberId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Member identifier is empty or invalid.
    InvalidMemberId(String),
    /// Member display name is empty or invalid.
    InvalidName(String),
    /// Member identifiers are not unique within one run.
    DuplicateMemberId(MemberId),
    /// A weekly-pattern weekday is outside 0..=6.
    InvalidWeekday {
        /// The offending member.
        member: MemberId,
        /// The out-of-range value.
        value: u8,
    },
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The range start.
        start: time::Date,
        /// The range end.
        end: time::Date,
    },
    /// A task definition name is empty.
    InvalidTaskName(String),
    /// A cadence string is not one of daily, weekly, monthly.
    InvalidCadence(String),
    /// A shift descriptor is malformed.
    InvalidShift {
        /// The shift label (may be empty).
        label: String,
        /// Why the shift was rejected.
        reason: String,
    },
    /// A shift table does not cover exactly seven weekdays.
    InvalidShiftTable {
        /// The number of weekday lists supplied.
        days: usize,
    },
    /// A nominal shift time is not in `HH:MM` form.
    InvalidShiftTime(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMemberId(msg) => write!(f, "Invalid member id: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DuplicateMemberId(id) => {
                write!(f, "Member with id '{}' appears more than once", id.value())
            }
            Self::InvalidWeekday { member, value } => {
                write!(
                    f,
                    "Invalid weekday {value} for member '{}'. Must be between 0 and 6",
                    member.value()
                )
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {start} is after {end}")
            }
            Self::InvalidTaskName(msg) => write!(f, "Invalid task name: {msg}"),
            Self::InvalidCadence(value) => {
                write!(
                    f,
                    "Invalid cadence '{value}'. Must be daily, weekly or monthly"
                )
            }
            Self::InvalidShift { label, reason } => {
                write!(f, "Invalid shift '{label}': {reason}")
            }
            Self::InvalidShiftTable { days } => {
                write!(
                    f,
                    "Invalid shift table: expected 7 weekday lists, found {days}"
                )
            }
            Self::InvalidShiftTime(value) => {
                write!(f, "Invalid shift time '{value}'. Expected HH:MM")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
