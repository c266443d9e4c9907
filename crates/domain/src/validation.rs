// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::weekday_from_index;
use crate::error::DomainError;
use crate::task::TaskDefinition;
use crate::types::{Member, MemberId};
use std::collections::BTreeSet;

/// Validates that a member's field constraints are met.
///
/// This function does NOT check identifier uniqueness (that requires the
/// whole member list).
///
/// # Arguments
///
/// * `member` - The member to validate
///
/// # Returns
///
/// * `Ok(())` if the member is valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The identifier is empty
/// - The display name is empty
/// - A weekly-pattern weekday is outside 0..=6
/// - An unavailable range ends before it starts
pub fn validate_member(member: &Member) -> Result<(), DomainError> {
    // Rule: identifier must not be empty
    if member.id.value().is_empty() {
        return Err(DomainError::InvalidMemberId(String::from(
            "Member id cannot be empty",
        )));
    }

    // Rule: name must not be empty
    if member.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: weekdays are 0 (Monday) through 6 (Sunday)
    if let Some(value) = member.weekly_pattern.iter().find(|day| **day > 6) {
        return Err(DomainError::InvalidWeekday {
            member: member.id.clone(),
            value: *value,
        });
    }

    // Rule: ranges must not be inverted (deserialized ranges skip the
    // constructor check)
    if let Some(range) = member
        .unavailable_ranges
        .iter()
        .find(|range| range.start() > range.end())
    {
        return Err(DomainError::InvalidDateRange {
            start: range.start(),
            end: range.end(),
        });
    }

    Ok(())
}

/// Validates that member identifiers are unique.
///
/// # Errors
///
/// Returns `DomainError::DuplicateMemberId` for the first repeated id.
pub fn validate_member_ids_unique(members: &[Member]) -> Result<(), DomainError> {
    let mut seen: BTreeSet<&MemberId> = BTreeSet::new();
    for member in members {
        if !seen.insert(&member.id) {
            return Err(DomainError::DuplicateMemberId(member.id.clone()));
        }
    }
    Ok(())
}

/// Validates the structural fields of a task definition.
///
/// Cadence-specific rules are not checked here; the expanders resolve them
/// with documented fallbacks.
///
/// # Errors
///
/// Returns an error if:
/// - The task name is empty
/// - Any shift descriptor (flat list or weekday table) is invalid
pub fn validate_task_definition(task: &TaskDefinition) -> Result<(), DomainError> {
    if task.name.trim().is_empty() {
        return Err(DomainError::InvalidTaskName(String::from(
            "Task name cannot be empty",
        )));
    }

    for shift in &task.shifts {
        shift.validate()?;
    }

    // Deserialized tables skip the constructor check
    if let Some(table) = &task.shift_table {
        for weekday in (0..7).filter_map(weekday_from_index) {
            for shift in table.for_weekday(weekday) {
                shift.validate()?;
            }
        }
    }

    Ok(())
}
