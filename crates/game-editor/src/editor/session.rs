//! The per-session editing state and its observable snapshot.

use crate::ledger::FieldChange;
use crate::model::{Field, FieldValues, Game};
use crate::validate::ValidationReport;
use std::collections::BTreeSet;

/// The state of one edit view: local field values, per-field pending-save
/// flags, and the current validation errors.
///
/// # Ownership
/// Exclusively owned by the controller task backing one edit view. Nothing
/// else writes to it, so no locking is needed; observers get clones via
/// [`EditorSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    /// Identifier of the record being edited.
    pub id: String,
    /// Current local form strings. Updated on every edit, never rolled back
    /// by a failed commit.
    pub values: FieldValues,
    /// Fields with a commit in flight.
    pub pending: BTreeSet<Field>,
    /// Current field errors, rendered as-is by a hosting UI.
    pub errors: ValidationReport,
}

impl EditSession {
    /// Seeds a session from the stored record.
    pub fn seed(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            values: FieldValues::from(game),
            pending: BTreeSet::new(),
            errors: ValidationReport::default(),
        }
    }
}

/// A point-in-time copy of the controller's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub values: FieldValues,
    pub errors: ValidationReport,
    /// Fields with a commit still in flight, in field order.
    pub pending: Vec<Field>,
    /// Acknowledged autosaves so far.
    pub change_count: usize,
    /// The most recent acknowledged autosave, if any.
    pub last_change: Option<FieldChange>,
}
