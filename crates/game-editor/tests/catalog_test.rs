//! Catalog flows against the mock client: validated create, list, find,
//! remove.

use chrono::{TimeZone, Utc};
use game_editor::catalog::{CatalogError, GameCatalog};
use game_editor::model::{Field, FieldValues, Game, Platform};
use resource_client::mock::{CallKind, MockClient};
use resource_client::ClientError;
use serde_json::json;
use std::sync::Arc;

fn stored_game() -> Game {
    Game {
        id: "7".into(),
        name: "Celeste".into(),
        platform: Platform::NintendoSwitch,
        released: Utc.with_ymd_and_hms(2018, 1, 25, 0, 0, 0).unwrap(),
        genre: Some("Platformer".into()),
        developer: None,
    }
}

fn draft() -> FieldValues {
    FieldValues {
        name: "Celeste".into(),
        platform: "Nintendo Switch".into(),
        released: "2018-01-25".into(),
        genre: "Platformer".into(),
        developer: String::new(),
    }
}

#[tokio::test]
async fn test_add_posts_the_converted_draft() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_create().return_ok(stored_game());

    let catalog = GameCatalog::new(Arc::new(mock.clone()));
    let game = catalog.add(&draft()).await.unwrap();
    assert_eq!(game.id, "7");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, CallKind::Create);
    // Date converted to ISO-8601, blank developer omitted entirely.
    assert_eq!(
        calls[0].body,
        Some(json!({
            "name": "Celeste",
            "platform": "Nintendo Switch",
            "released": "2018-01-25T00:00:00Z",
            "genre": "Platformer",
        }))
    );
    mock.verify();
}

#[tokio::test]
async fn test_add_rejects_an_invalid_draft_without_calling_out() {
    let mock = MockClient::<Game>::new();
    let catalog = GameCatalog::new(Arc::new(mock.clone()));

    let result = catalog.add(&FieldValues::default()).await;
    let Err(CatalogError::Invalid(report)) = result else {
        panic!("expected a validation failure, got {result:?}");
    };

    // Every required field is reported at once.
    assert_eq!(report.len(), 3);
    assert!(report.error(Field::Name).is_some());
    assert!(report.error(Field::Platform).is_some());
    assert!(report.error(Field::Released).is_some());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_list_fetches_the_collection() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_fetch_all().return_ok(vec![stored_game()]);

    let catalog = GameCatalog::new(Arc::new(mock.clone()));
    let games = catalog.list().await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].name, "Celeste");
}

#[tokio::test]
async fn test_find_surfaces_not_found() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_fetch_one("99").return_err(ClientError::NotFound);

    let catalog = GameCatalog::new(Arc::new(mock.clone()));
    assert_eq!(
        catalog.find("99").await,
        Err(CatalogError::Client(ClientError::NotFound))
    );
}

#[tokio::test]
async fn test_remove_deletes_by_id() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_delete("7").return_ok();

    let catalog = GameCatalog::new(Arc::new(mock.clone()));
    catalog.remove("7").await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].op, CallKind::Delete);
    assert_eq!(calls[0].id.as_deref(), Some("7"));
    mock.verify();
}
