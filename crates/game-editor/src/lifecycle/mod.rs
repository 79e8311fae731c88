//! # Session Lifecycle & Orchestration
//!
//! Individual pieces — loader, controller, event stream — are simple; wiring
//! them is where the coordination lives. [`Editor`] is that conductor for one
//! edit view:
//!
//! 1. **Load** the record and seed the session ([`RecordLoader`]).
//! 2. **Spawn** the controller task with the injected client.
//! 3. **Hand back** the handle and the event stream.
//! 4. **Close** by dropping the handle: the request channel closes, the loop
//!    drains and exits, and the task is awaited.
//!
//! ## Shutdown semantics
//!
//! Closing is the "navigate away" moment. Pending UI reactions to outstanding
//! commits are cancelled — once the loop exits, no further ledger or
//! error-state mutation is observable. The in-flight remote writes themselves
//! are *not* aborted: each runs in its own task and the remote store has
//! already been instructed to merge the partial update.
//!
//! Dropping every [`EditorHandle`] clone has the same effect as `close`,
//! minus awaiting the task.
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging for the whole process;
//! `RUST_LOG` controls verbosity.

pub mod telemetry;

pub use telemetry::setup_tracing;

use crate::editor::{EditController, EditorEvent, EditorHandle};
use crate::loader::{LoadError, RecordLoader};
use crate::model::Game;
use resource_client::ResourceClient;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A running edit view: the controller task and the handle driving it.
pub struct Editor {
    /// Drives the session. Clones share the same controller.
    pub handle: EditorHandle,
    task: tokio::task::JoinHandle<()>,
}

impl Editor {
    /// Loads the record, spawns the controller, and returns the editor plus
    /// its event stream.
    ///
    /// Fails with a [`LoadError`] when the record cannot be fetched; no
    /// session or task exists in that case.
    pub async fn open(
        client: Arc<dyn ResourceClient<Game>>,
        id: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<EditorEvent>), LoadError> {
        let session = RecordLoader::new(Arc::clone(&client)).load(id).await?;
        let (controller, handle, events) = EditController::new(client, session, 32);
        let task = tokio::spawn(controller.run());
        Ok((Self { handle, task }, events))
    }

    /// Closes the session and awaits the controller task.
    ///
    /// Only this editor's handle is dropped here; if the caller cloned the
    /// handle elsewhere, the task exits once the last clone is gone.
    pub async fn close(self) {
        drop(self.handle);
        let _ = self.task.await;
    }
}
