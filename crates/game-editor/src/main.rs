//! Demo walk of the whole editing flow against a live collection.
//!
//! Points at the server named by `GAMES_API_URL` (default
//! `http://localhost:3000`) and exercises: create, list, open an editor,
//! autosave edits (including one the validator rejects), save-all, delete.
//!
//! ```bash
//! GAMES_API_URL=http://localhost:3000 RUST_LOG=info cargo run -p game-editor
//! ```

use game_editor::catalog::GameCatalog;
use game_editor::lifecycle::{setup_tracing, Editor};
use game_editor::model::{Field, FieldValues, Game};
use resource_client::{ResourceClient, RestClient};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let base_url =
        std::env::var("GAMES_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    info!(%base_url, "Starting editor demo");

    let client: Arc<dyn ResourceClient<Game>> = Arc::new(RestClient::<Game>::new(base_url));
    let catalog = GameCatalog::new(Arc::clone(&client));

    // Create a record to edit.
    let draft = FieldValues {
        name: "Hollow Knight".into(),
        platform: "PC".into(),
        released: "2017-02-24".into(),
        genre: "Metroidvania".into(),
        developer: String::new(),
    };
    let game = catalog.add(&draft).await.map_err(|e| e.to_string())?;
    info!(game_id = %game.id, "Game created");

    // Open the edit session and watch its events.
    let span = tracing::info_span!("edit_session", game_id = %game.id);
    async {
        let (editor, mut events) = Editor::open(Arc::clone(&client), &game.id)
            .await
            .map_err(|e| e.to_string())?;
        let event_log = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                info!(?event, "Editor event");
            }
        });

        // A valid edit autosaves immediately.
        editor
            .handle
            .edit(Field::Developer, "Team Cherry")
            .await
            .map_err(|e| e.to_string())?;

        // An invalid one is rejected locally; nothing goes on the wire.
        let rejected = editor
            .handle
            .edit(Field::Name, "")
            .await
            .map_err(|e| e.to_string())?;
        warn!(?rejected, "Blank name rejected as expected");

        // Fix it and save everything in one atomic update.
        editor
            .handle
            .edit(Field::Name, "Hollow Knight: Voidheart Edition")
            .await
            .map_err(|e| e.to_string())?;

        let snapshot = editor.handle.snapshot().await.map_err(|e| e.to_string())?;
        info!(changes = snapshot.change_count, "Session state before save-all");

        let saved = editor.handle.save_all().await.map_err(|e| e.to_string())?;
        info!(name = %saved.name, "All fields saved");

        editor.close().await;
        let _ = event_log.await;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Clean up and show the final list.
    catalog.remove(&game.id).await.map_err(|e| e.to_string())?;
    let remaining = catalog.list().await.map_err(|e| e.to_string())?;
    info!(count = remaining.len(), "Demo finished");

    Ok(())
}
