//! # Change Ledger
//!
//! Bookkeeping for acknowledged autosaves. The controller appends an entry
//! each time the remote acknowledges a single-field write; the running count
//! is what a hosting UI shows as "Total Changes Made".
//!
//! Failed commits and validation rejections never touch the ledger — a
//! [`ChangeOutcome::Failed`] entry exists as a value only so the event stream
//! can describe failures with the same vocabulary.

use crate::model::Field;
use chrono::{DateTime, Utc};

/// How a field change resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Saved,
    Failed,
}

/// One autosaved field change.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: Field,
    pub value: String,
    pub at: DateTime<Utc>,
    pub outcome: ChangeOutcome,
}

impl FieldChange {
    /// A successfully acknowledged change, stamped now.
    pub fn saved(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            at: Utc::now(),
            outcome: ChangeOutcome::Saved,
        }
    }
}

/// Append-only record of acknowledged autosaves for one edit session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeLedger {
    entries: Vec<FieldChange>,
}

impl ChangeLedger {
    /// Appends an acknowledged change.
    pub fn record(&mut self, change: FieldChange) {
        self.entries.push(change);
    }

    /// Number of acknowledged writes so far.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[FieldChange] {
        &self.entries
    }

    pub fn last(&self) -> Option<&FieldChange> {
        self.entries.last()
    }
}
