// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod availability;
pub mod calendar;
mod error;
mod rest_day;
pub mod rules;
mod task;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{Assignment, Schedule};
pub use availability::{is_available, is_available_on_all};
pub use error::DomainError;
pub use rest_day::{is_rest_date, rest_date, rest_dates_for};
pub use rules::{DayOfMonth, RuleBag, RuleValue, ShiftRule};
pub use task::{
    BuiltInTask, Cadence, ShiftDescriptor, ShiftTable, TaskClass, TaskDefinition, TaskId,
    parse_shift_time,
};
pub use types::{DateRange, Member, MemberId};
pub use validation::{validate_member, validate_member_ids_unique, validate_task_definition};
