//! Error types for the edit controller.

use crate::validate::ValidationReport;
use resource_client::ClientError;
use thiserror::Error;

/// Errors surfaced by [`EditorHandle`](crate::editor::EditorHandle) calls.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    /// Local validation rejected the operation; no remote call was made.
    /// Carries the full set of field errors, not just the first.
    #[error("Validation failed for {} field(s)", .0.len())]
    Invalid(ValidationReport),

    /// The remote call failed; the session continues.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The controller task is gone (session closed).
    #[error("Editor closed")]
    Closed,
}
