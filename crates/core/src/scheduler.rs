// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::builtin::default_tasks;
use crate::config::SchedulingConfig;
use crate::context::RunContext;
use crate::error::CoreError;
use crate::expand::{Expansion, expand_daily, expand_monthly, expand_weekly};
use crate::ledger::{FairnessLedger, SeedCounts};
use crate::resolve::{
    TaskSettings, WeekSettings, resolve_day_of_month, resolve_settings, resolve_shift_table,
    resolve_week,
};
use rota_audit::AuditLog;
use rota_domain::{
    Assignment, Cadence, DateRange, DayOfMonth, Member, MemberId, Schedule, TaskDefinition,
    validate_member, validate_task_definition,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use tracing::{info, instrument, warn};

/// Inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Members in caller order. Order matters only for reports.
    pub members: Vec<Member>,
    /// The inclusive range to schedule.
    pub range: DateRange,
    /// Task definitions; absent or empty selects the built-in families.
    #[serde(default)]
    pub tasks: Option<Vec<TaskDefinition>>,
    /// Per-task member subsets keyed by task name.
    #[serde(default)]
    pub task_members: BTreeMap<String, Vec<MemberId>>,
    /// Historical fairness counts.
    #[serde(default)]
    pub seed_counts: SeedCounts,
}

impl GenerationRequest {
    /// Creates a request for the built-in families with no history.
    #[must_use]
    pub fn new(members: Vec<Member>, range: DateRange) -> Self {
        Self {
            members,
            range,
            tasks: None,
            task_members: BTreeMap::new(),
            seed_counts: SeedCounts::new(),
        }
    }

    /// Sets the task definitions.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<TaskDefinition>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Restricts `task` to the given member ids.
    #[must_use]
    pub fn with_task_members(mut self, task: &str, members: &[&str]) -> Self {
        self.task_members.insert(
            task.to_string(),
            members.iter().map(|id| MemberId::new(id)).collect(),
        );
        self
    }

    /// Seeds the ledger from history.
    #[must_use]
    pub fn with_seed_counts(mut self, seed_counts: SeedCounts) -> Self {
        self.seed_counts = seed_counts;
        self
    }
}

/// Outputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The generated assignments.
    pub schedule: Schedule,
    /// The decision trail.
    pub audit: AuditLog,
    /// Fairness counts after the run, for write-back.
    pub ledger: FairnessLedger,
}

/// The allocation engine.
///
/// A `Scheduler` holds only configuration. Every call to `generate` starts
/// from a fresh run context, so calls never influence each other except
/// through the seed counts the caller passes in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    config: SchedulingConfig,
}

impl Scheduler {
    /// Creates a scheduler with the given configuration.
    #[must_use]
    pub const fn new(config: SchedulingConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Rebuilds seed counts from persisted assignments using the
    /// configured fairness window.
    ///
    /// # Arguments
    ///
    /// * `history` - Previously generated assignments
    /// * `as_of` - Usually the first day of the next run
    #[must_use]
    pub fn seed_from_history(&self, history: &[Assignment], as_of: Date) -> SeedCounts {
        FairnessLedger::from_history(history, as_of, self.config.fairness_window_days)
            .into_counts()
    }

    /// Generates a schedule.
    ///
    /// Tasks are expanded in order; each sees the placements of the tasks
    /// before it. Invalid members and task definitions are dropped with a
    /// warning entry. Staffing shortfalls and configuration defects are
    /// recorded in the audit log and never abort the run.
    ///
    /// # Arguments
    ///
    /// * `request` - The run inputs
    ///
    /// # Returns
    ///
    /// The schedule, the audit log and the final fairness ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The requested range ends before it starts
    /// - A built-in task cannot be built from the configuration
    /// - Date arithmetic overflows while walking the range
    /// - The selector invariant is violated
    #[instrument(
        skip_all,
        fields(
            start = %request.range.start(),
            end = %request.range.end(),
            members = request.members.len()
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, CoreError> {
        self.config.validate()?;
        let range: DateRange = DateRange::new(request.range.start(), request.range.end())?;

        let mut ctx: RunContext = RunContext::new(
            FairnessLedger::seeded(request.seed_counts.clone()),
            self.config.rest_rule_enabled,
        );
        let members: Vec<&Member> = admit_members(&request.members, &mut ctx.audit);

        let tasks: Vec<TaskDefinition> = match &request.tasks {
            Some(tasks) if !tasks.is_empty() => tasks.clone(),
            _ => default_tasks(&self.config)?,
        };

        info!(tasks = tasks.len(), admitted = members.len(), "Generating schedule");

        for task in &tasks {
            if let Err(err) = validate_task_definition(task) {
                warn!(task = %task.name, error = %err, "Task definition rejected");
                ctx.audit
                    .record_warning(format!("Task '{}' skipped: {err}", task.name));
                continue;
            }

            let pool: Vec<&Member> = member_pool(task, &members, request, &mut ctx.audit);
            let settings: TaskSettings = resolve_settings(task, &self.config, &mut ctx.audit);
            let run: Expansion<'_, '_> = Expansion {
                task,
                settings,
                pool: &pool,
                range,
            };

            info!(
                task = %task.name,
                cadence = %task.cadence,
                pool = pool.len(),
                "Expanding task"
            );

            match task.cadence {
                Cadence::Daily => {
                    match resolve_shift_table(task, &settings, &mut ctx.audit) {
                        Ok(table) => expand_daily(&run, &table, &mut ctx)?,
                        Err(err) => {
                            warn!(task = %task.name, error = %err, "Shift table rejected");
                            ctx.audit
                                .record_warning(format!("Task '{}' skipped: {err}", task.name));
                        }
                    }
                }
                Cadence::Weekly => {
                    let week: WeekSettings = resolve_week(task, &self.config, &mut ctx.audit);
                    expand_weekly(&run, &week, &mut ctx)?;
                }
                Cadence::Monthly => {
                    let day: DayOfMonth = resolve_day_of_month(task, &mut ctx.audit);
                    expand_monthly(&run, day, &mut ctx)?;
                }
            }
        }

        let (assignments, audit, ledger) = ctx.into_parts();
        let mut schedule: Schedule = Schedule::new(range);
        schedule.assignments = assignments;

        info!(
            assignments = schedule.len(),
            audit_entries = audit.len(),
            "Schedule generated"
        );

        Ok(GenerationOutcome {
            schedule,
            audit,
            ledger,
        })
    }
}

/// Drops invalid and duplicate members, recording a warning for each.
fn admit_members<'m>(members: &'m [Member], audit: &mut AuditLog) -> Vec<&'m Member> {
    let mut seen: BTreeSet<&MemberId> = BTreeSet::new();
    let mut admitted: Vec<&'m Member> = Vec::with_capacity(members.len());

    for member in members {
        if let Err(err) = validate_member(member) {
            warn!(member = %member.id, error = %err, "Member rejected");
            audit.record_warning(format!("Member '{}' excluded: {err}", member.id));
            continue;
        }
        if !seen.insert(&member.id) {
            warn!(member = %member.id, "Duplicate member rejected");
            audit.record_warning(format!(
                "Member '{}' excluded: id appears more than once",
                member.id
            ));
            continue;
        }
        admitted.push(member);
    }

    admitted
}

/// Returns the members `task` may draw from, in member-list order.
fn member_pool<'m>(
    task: &TaskDefinition,
    members: &[&'m Member],
    request: &GenerationRequest,
    audit: &mut AuditLog,
) -> Vec<&'m Member> {
    let Some(subset) = request.task_members.get(&task.name) else {
        return members.to_vec();
    };

    for id in subset {
        if !members.iter().any(|member| &member.id == id) {
            warn!(task = %task.name, member = %id, "Unknown member in task subset");
            audit.record_warning(format!(
                "Task '{}' subset names unknown member '{id}'",
                task.name
            ));
        }
    }

    members
        .iter()
        .copied()
        .filter(|member| subset.contains(&member.id))
        .collect()
}
