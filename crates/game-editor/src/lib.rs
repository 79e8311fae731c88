//! # Game Editor
//!
//! The editing core for a remote games collection: per-field autosave with
//! validation gating, change tracking, and a separate save-all-and-exit path.
//!
//! ## Core Components
//!
//! - **[model]**: the [`Game`](model::Game) wire types, the editable
//!   [`Field`](model::Field)s, and the form-string ↔ wire conversions.
//! - **[validate]**: pure per-field and whole-record rules. Returns data,
//!   never touches presentation.
//! - **[ledger]**: the [`ChangeLedger`](ledger::ChangeLedger) of acknowledged
//!   autosaves and its running count.
//! - **[editor]**: the [`EditController`](editor::EditController), an
//!   actor-style task owning one [`EditSession`](editor::EditSession);
//!   drive it through an [`EditorHandle`](editor::EditorHandle) and observe
//!   it through [`EditorEvent`](editor::EditorEvent)s and snapshots.
//! - **[loader]**: seeds an edit session from the remote record.
//! - **[catalog]**: the validated create / list / find / remove flows backing
//!   the non-edit pages.
//! - **[lifecycle]**: wires a loader, controller task, and event stream
//!   together, and owns the tracing setup.
//!
//! ## Quick Start
//!
//! ```ignore
//! let client: Arc<dyn ResourceClient<Game>> = Arc::new(RestClient::new(base_url));
//! let (editor, mut events) = Editor::open(client, "42").await?;
//!
//! editor.handle.edit(Field::Genre, "RPG").await?;   // autosaves immediately
//! let game = editor.handle.save_all().await?;        // whole record, then exit
//! editor.close().await;
//! ```

pub mod catalog;
pub mod editor;
pub mod ledger;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod validate;
