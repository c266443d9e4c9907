// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::ConfigError;
use rota_domain::{DomainError, TaskId};
use thiserror::Error;
use time::Date;

/// Errors that abort a generation run.
///
/// Shortfalls and configuration defects never surface here; they are
/// recorded in the audit log and the run continues.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selector was asked to choose from an empty candidate set.
    ///
    /// Expanders check for shortfalls first, so this indicates a defect in
    /// the caller rather than a staffing problem.
    #[error("No candidates supplied for {task} on {date}")]
    SelectionInvariant {
        /// The fairness identifier being selected for.
        task: TaskId,
        /// The slot date.
        date: Date,
    },
    /// An input value object failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
    /// The scheduling configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
