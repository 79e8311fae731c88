//! # Edit Controller
//!
//! The per-field autosave engine. One [`EditController`] task owns one
//! [`EditSession`] and processes messages sequentially; callers drive it
//! through a cloneable [`EditorHandle`] and observe asynchronous outcomes
//! through an [`EditorEvent`] stream.
//!
//! # Architecture Note
//! This is the "server" half of an actor: because the task has exclusive
//! ownership of the session, there are no locks anywhere in the engine. The
//! remote call for a commit runs in its own spawned task and posts a
//! completion message back, so a hung call pins only its own field while the
//! controller keeps serving every other field.
//!
//! ## The per-field state machine
//!
//! An edit moves a field through `validate → commit → resolve`:
//!
//! - Validation (or conversion) rejects the value: the error is recorded, no
//!   remote call is made, and the caller gets [`EditOutcome::Rejected`].
//! - The value passes: a commit task is spawned carrying *exactly* the one
//!   changed field, and the caller gets [`EditOutcome::Committing`].
//! - The commit resolves: a fresh success clears the pending flag and any
//!   stale error, appends to the ledger, and emits
//!   [`EditorEvent::FieldSaved`]; a fresh failure keeps the typed value (no
//!   rollback), clears the pending flag, and emits
//!   [`EditorEvent::SaveFailed`] exactly once. No retries.
//!
//! ## Last-write-wins
//!
//! Edits to the same field may overlap: each in-flight commit is tagged with
//! the value it was sent with, and a completion whose tag no longer matches
//! the field's current local value is *stale*. A stale completion must not
//! touch the field's value, pending flag, or error state. A stale success
//! still appends to the ledger — the remote did acknowledge a write, and the
//! count mirrors acknowledged writes — while a stale failure is discarded
//! outright; the newer commit reports its own outcome.

pub mod error;
pub mod session;

pub use error::EditorError;
pub use session::{EditSession, EditorSnapshot};

use crate::ledger::{ChangeLedger, FieldChange};
use crate::model::{Field, Game};
use crate::validate::{validate_field, validate_record};
use resource_client::{ClientError, ResourceClient};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// How an edit resolved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Validation or conversion rejected the value; no remote call was made.
    Rejected(String),
    /// The value passed the local gate; a single-field commit is in flight.
    Committing,
}

/// Asynchronous outcomes, emitted as they resolve.
///
/// The hosting UI decides how to present these; the engine never raises
/// dialogs of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The remote acknowledged a single-field autosave.
    FieldSaved {
        field: Field,
        value: String,
        total_changes: usize,
    },
    /// A value failed the local gate. Mirrors the report entry, for hosts
    /// that render from the event stream rather than from snapshots.
    FieldRejected { field: Field, message: String },
    /// A commit failed remotely. Reported once; the local value is kept and
    /// the commit is not retried.
    SaveFailed {
        field: Field,
        value: String,
        error: ClientError,
    },
}

/// Requests sent from the handle to the controller task.
#[derive(Debug)]
enum EditorRequest {
    Edit {
        field: Field,
        value: String,
        respond_to: oneshot::Sender<EditOutcome>,
    },
    SaveAll {
        respond_to: oneshot::Sender<Result<Game, EditorError>>,
    },
    Snapshot {
        respond_to: oneshot::Sender<EditorSnapshot>,
    },
}

/// A resolved commit, posted back by the spawned commit task. `value` is the
/// tag the commit was sent with; staleness is decided against it.
#[derive(Debug)]
struct CommitResolved {
    field: Field,
    value: String,
    result: Result<Game, ClientError>,
}

/// A cloneable, async handle to a running [`EditController`].
#[derive(Clone)]
pub struct EditorHandle {
    sender: mpsc::Sender<EditorRequest>,
}

impl EditorHandle {
    /// Applies a field edit: updates the local value, validates, and — if the
    /// value passes — autosaves that one field immediately.
    pub async fn edit(
        &self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<EditOutcome, EditorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EditorRequest::Edit {
                field,
                value: value.into(),
                respond_to,
            })
            .await
            .map_err(|_| EditorError::Closed)?;
        response.await.map_err(|_| EditorError::Closed)
    }

    /// Validates the whole record and, only if every field passes, persists
    /// it in one whole-record update. Returns the stored record so the caller
    /// can navigate away. The ledger is not touched.
    pub async fn save_all(&self) -> Result<Game, EditorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EditorRequest::SaveAll { respond_to })
            .await
            .map_err(|_| EditorError::Closed)?;
        response.await.map_err(|_| EditorError::Closed)?
    }

    /// A point-in-time copy of the controller's observable state.
    pub async fn snapshot(&self) -> Result<EditorSnapshot, EditorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EditorRequest::Snapshot { respond_to })
            .await
            .map_err(|_| EditorError::Closed)?;
        response.await.map_err(|_| EditorError::Closed)
    }
}

/// The controller task. Create with [`EditController::new`], then spawn
/// [`EditController::run`].
pub struct EditController {
    session: EditSession,
    client: Arc<dyn ResourceClient<Game>>,
    ledger: ChangeLedger,
    requests: mpsc::Receiver<EditorRequest>,
    completions_tx: mpsc::UnboundedSender<CommitResolved>,
    completions_rx: mpsc::UnboundedReceiver<CommitResolved>,
    events: mpsc::UnboundedSender<EditorEvent>,
}

impl EditController {
    /// Creates the controller, its handle, and the event stream.
    pub fn new(
        client: Arc<dyn ResourceClient<Game>>,
        session: EditSession,
        buffer_size: usize,
    ) -> (
        Self,
        EditorHandle,
        mpsc::UnboundedReceiver<EditorEvent>,
    ) {
        let (sender, requests) = mpsc::channel(buffer_size);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (events, event_stream) = mpsc::unbounded_channel();
        let controller = Self {
            session,
            client,
            ledger: ChangeLedger::default(),
            requests,
            completions_tx,
            completions_rx,
            events,
        };
        (controller, EditorHandle { sender }, event_stream)
    }

    /// Runs the controller loop until every handle is dropped.
    ///
    /// Completions may arrive in any order relative to when their commits
    /// were issued; nothing here assumes FIFO completion. Once the loop
    /// exits, queued completions go nowhere: the session is gone and no
    /// further ledger or error-state mutation is observable. The in-flight
    /// remote writes themselves run to completion in their own tasks.
    pub async fn run(mut self) {
        info!(game_id = %self.session.id, "Editor started");

        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => self.handle_request(request).await,
                    None => break,
                },
                // The loop holds its own completion sender, so this channel
                // never yields None while the loop is alive.
                Some(resolved) = self.completions_rx.recv() => {
                    self.handle_completion(resolved);
                }
            }
        }

        info!(
            game_id = %self.session.id,
            changes = self.ledger.count(),
            "Editor closed"
        );
    }

    async fn handle_request(&mut self, request: EditorRequest) {
        match request {
            EditorRequest::Edit {
                field,
                value,
                respond_to,
            } => {
                let outcome = self.handle_edit(field, value);
                let _ = respond_to.send(outcome);
            }
            EditorRequest::SaveAll { respond_to } => {
                let result = self.handle_save_all().await;
                let _ = respond_to.send(result);
            }
            EditorRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
        }
    }

    fn handle_edit(&mut self, field: Field, value: String) -> EditOutcome {
        debug!(game_id = %self.session.id, %field, ?value, "Edit");

        // Local state reflects the keystroke immediately, valid or not.
        self.session.values.set(field, value.clone());

        // Gate 1: validation.
        if let Some(message) = validate_field(field, &value) {
            return self.reject(field, message);
        }

        // Gate 2: conversion to the wire value (date parsing, platform enum).
        let patch = match self.session.values.patch_for(field) {
            Ok(patch) => patch,
            Err(message) => return self.reject(field, message),
        };

        self.session.errors.clear(field);
        self.session.pending.insert(field);

        // Commit exactly the one changed field, tagged with the value it was
        // sent with. The task is fire-and-forget past this point: if the
        // session closes first, the write still reaches the remote but its
        // completion goes nowhere.
        let client = Arc::clone(&self.client);
        let completions = self.completions_tx.clone();
        let id = self.session.id.clone();
        tokio::spawn(async move {
            let result = client.update(&id, patch).await;
            let _ = completions.send(CommitResolved {
                field,
                value,
                result,
            });
        });

        EditOutcome::Committing
    }

    fn reject(&mut self, field: Field, message: String) -> EditOutcome {
        debug!(game_id = %self.session.id, %field, %message, "Edit rejected");
        self.session.errors.insert(field, message.clone());
        self.emit(EditorEvent::FieldRejected {
            field,
            message: message.clone(),
        });
        EditOutcome::Rejected(message)
    }

    fn handle_completion(&mut self, resolved: CommitResolved) {
        let CommitResolved {
            field,
            value,
            result,
        } = resolved;
        let stale = self.session.values.get(field) != value;

        match result {
            Ok(_) => {
                // Every acknowledged write counts, stale or not; the count
                // mirrors what the remote actually accepted.
                self.ledger.record(FieldChange::saved(field, value.clone()));
                if stale {
                    debug!(game_id = %self.session.id, %field, "Stale ack, counted only");
                    return;
                }
                self.session.pending.remove(&field);
                self.session.errors.clear(field);
                info!(
                    game_id = %self.session.id,
                    %field,
                    changes = self.ledger.count(),
                    "Field saved"
                );
                self.emit(EditorEvent::FieldSaved {
                    field,
                    value,
                    total_changes: self.ledger.count(),
                });
            }
            Err(error) => {
                if stale {
                    debug!(game_id = %self.session.id, %field, "Stale failure, discarded");
                    return;
                }
                self.session.pending.remove(&field);
                warn!(game_id = %self.session.id, %field, %error, "Autosave failed");
                self.emit(EditorEvent::SaveFailed {
                    field,
                    value,
                    error,
                });
            }
        }
    }

    async fn handle_save_all(&mut self) -> Result<Game, EditorError> {
        debug!(game_id = %self.session.id, "Save all");

        let report = validate_record(&self.session.values);
        if !report.is_empty() {
            warn!(game_id = %self.session.id, fields = report.len(), "Save all rejected");
            self.session.errors = report.clone();
            return Err(EditorError::Invalid(report));
        }

        let patch = match self.session.values.full_patch() {
            Ok(patch) => patch,
            Err(report) => {
                self.session.errors = report.clone();
                return Err(EditorError::Invalid(report));
            }
        };

        let game = self.client.update(&self.session.id, patch).await?;
        info!(game_id = %self.session.id, "All fields saved");
        Ok(game)
    }

    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            values: self.session.values.clone(),
            errors: self.session.errors.clone(),
            pending: self.session.pending.iter().copied().collect(),
            change_count: self.ledger.count(),
            last_change: self.ledger.last().cloned(),
        }
    }

    fn emit(&self, event: EditorEvent) {
        // The host may have dropped the stream; that only means no one is
        // watching.
        let _ = self.events.send(event);
    }
}
