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

use serde::{Deserialize, Serialize};

/// Classifies an audit entry.
///
/// The classification decides the prefix of the rendered line so that a
/// reader can scan a trail for shortfalls and configuration fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A selection or other allocation decision.
    Decision,
    /// A recoverable problem, such as a staffing shortfall.
    Warning,
    /// A configuration defect replaced by a documented default.
    Fallback,
    /// A unit of work that was deliberately not produced.
    Skip,
}

impl EntryKind {
    /// Returns the prefix used when rendering an entry of this kind.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Decision => "",
            Self::Warning => "WARNING: ",
            Self::Fallback => "CONFIG: ",
            Self::Skip => "SKIP: ",
        }
    }
}

/// A single immutable audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The entry classification.
    pub kind: EntryKind,
    /// The human-readable message, without prefix.
    pub message: String,
}

impl AuditEntry {
    /// Creates a new `AuditEntry`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The entry classification
    /// * `message` - The message text
    #[must_use]
    pub const fn new(kind: EntryKind, message: String) -> Self {
        Self { kind, message }
    }

    /// Returns the rendered line for this entry.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.message)
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.message)
    }
}

/// An ordered, append-only decision trail for one generation run.
///
/// Entries can be appended and read but never edited or removed. Two runs
/// over identical inputs produce identical logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn record(&mut self, kind: EntryKind, message: String) {
        self.entries.push(AuditEntry::new(kind, message));
    }

    /// Appends a decision entry.
    pub fn record_decision(&mut self, message: String) {
        self.record(EntryKind::Decision, message);
    }

    /// Appends a warning entry.
    pub fn record_warning(&mut self, message: String) {
        self.record(EntryKind::Warning, message);
    }

    /// Appends a configuration fallback entry.
    pub fn record_fallback(&mut self, message: String) {
        self.record(EntryKind::Fallback, message);
    }

    /// Appends a skip entry.
    pub fn record_skip(&mut self, message: String) {
        self.record(EntryKind::Skip, message);
    }

    /// Returns the entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Returns the entries of one kind, in append order.
    pub fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Returns the rendered lines in append order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(AuditEntry::line).collect()
    }

    /// Renders the whole log as newline-separated text.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
