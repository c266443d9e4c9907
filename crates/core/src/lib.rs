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

mod builtin;
mod config;
mod context;
mod eligibility;
mod error;
mod expand;
mod ledger;
mod resolve;
mod scheduler;
mod selector;
mod tie_break;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use builtin::{
    MONITORING_DUTY, TICKET_REVIEW_DUTY, default_tasks, monitoring_duty, ticket_review_duty,
};
pub use config::{ConfigError, MonitoringWindows, SchedulingConfig, ShiftWindow};
pub use context::{Placement, RunContext};
pub use eligibility::{Ineligibility, SlotSpec, check_member, eligible_candidates};
pub use error::CoreError;
pub use expand::{Expansion, expand_daily, expand_monthly, expand_weekly, monthly_anchors};
pub use ledger::{FairnessLedger, LedgerRow, SeedCounts};
pub use resolve::{
    TaskSettings, WeekSettings, resolve_day_of_month, resolve_settings, resolve_shift_table,
    resolve_week,
};
pub use scheduler::{GenerationOutcome, GenerationRequest, Scheduler};
pub use selector::{TargetShares, select_assignee};
pub use tie_break::{fnv1a_32, tie_break_index, tie_break_key};
