//! Controller scenarios against the mock client: validation gating, sparse
//! commits, ledger bookkeeping, failure reporting, and last-write-wins with
//! completions resolving in either order.

use chrono::{TimeZone, Utc};
use game_editor::editor::{
    EditController, EditOutcome, EditSession, EditorError, EditorEvent, EditorHandle,
    EditorSnapshot,
};
use game_editor::model::{Field, Game, Platform};
use resource_client::mock::{CallKind, MockClient};
use resource_client::ClientError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn stored_game() -> Game {
    Game {
        id: "42".into(),
        name: "Foo".into(),
        platform: Platform::Pc,
        released: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        genre: None,
        developer: None,
    }
}

fn spawn_editor(
    mock: &MockClient<Game>,
) -> (
    EditorHandle,
    mpsc::UnboundedReceiver<EditorEvent>,
    tokio::task::JoinHandle<()>,
) {
    let session = EditSession::seed(&stored_game());
    let (controller, handle, events) = EditController::new(Arc::new(mock.clone()), session, 32);
    let task = tokio::spawn(controller.run());
    (handle, events, task)
}

/// The mock records a call the moment the commit task reaches it, even while
/// the response is gated; waiting on the call log pins commit ordering.
async fn wait_for_calls(mock: &MockClient<Game>, count: usize) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while mock.calls().len() < count {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("expected calls never arrived");
}

async fn wait_for_change_count(handle: &EditorHandle, count: usize) -> EditorSnapshot {
    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            let snapshot = handle.snapshot().await.unwrap();
            if snapshot.change_count >= count {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("change count never reached")
}

#[tokio::test]
async fn test_invalid_edit_makes_no_call_and_leaves_ledger() {
    let mock = MockClient::<Game>::new();
    let (handle, mut events, _task) = spawn_editor(&mock);

    let outcome = handle.edit(Field::Name, "").await.unwrap();
    assert_eq!(
        outcome,
        EditOutcome::Rejected("Game name is required".into())
    );

    assert_eq!(
        events.recv().await,
        Some(EditorEvent::FieldRejected {
            field: Field::Name,
            message: "Game name is required".into(),
        })
    );

    let snapshot = handle.snapshot().await.unwrap();
    // The keystroke sticks locally even though it was rejected.
    assert_eq!(snapshot.values.name, "");
    assert_eq!(
        snapshot.errors.error(Field::Name),
        Some("Game name is required")
    );
    assert_eq!(snapshot.change_count, 0);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_valid_optional_edit_issues_one_sparse_update() {
    let mut mock = MockClient::<Game>::new();
    let mut acknowledged = stored_game();
    acknowledged.genre = Some("RPG".into());
    mock.expect_update("42").return_ok(acknowledged);

    let (handle, mut events, _task) = spawn_editor(&mock);

    let outcome = handle.edit(Field::Genre, "RPG").await.unwrap();
    assert_eq!(outcome, EditOutcome::Committing);

    assert_eq!(
        events.recv().await,
        Some(EditorEvent::FieldSaved {
            field: Field::Genre,
            value: "RPG".into(),
            total_changes: 1,
        })
    );

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, CallKind::Update);
    assert_eq!(calls[0].id.as_deref(), Some("42"));
    assert_eq!(calls[0].body, Some(json!({ "genre": "RPG" })));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.change_count, 1);
    assert!(snapshot.pending.is_empty());
    assert_eq!(snapshot.last_change.unwrap().field, Field::Genre);
    mock.verify();
}

#[tokio::test]
async fn test_duplicate_same_value_edits_commit_independently() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_update("42").return_ok(stored_game());
    mock.expect_update("42").return_ok(stored_game());

    let (handle, mut events, _task) = spawn_editor(&mock);

    handle.edit(Field::Developer, "Supergiant").await.unwrap();
    wait_for_calls(&mock, 1).await;
    handle.edit(Field::Developer, "Supergiant").await.unwrap();

    // The remote update is idempotent, so both commits land and both count.
    assert!(matches!(
        events.recv().await,
        Some(EditorEvent::FieldSaved { total_changes: 1, .. })
    ));
    assert!(matches!(
        events.recv().await,
        Some(EditorEvent::FieldSaved { total_changes: 2, .. })
    ));
    assert_eq!(mock.calls().len(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_last_write_wins_when_newer_completion_lands_first() {
    let mut mock = MockClient::<Game>::new();
    let (expectation, first_commit) = mock.expect_update("42").gated();
    expectation.return_ok(stored_game());
    let (expectation, second_commit) = mock.expect_update("42").gated();
    expectation.return_ok(stored_game());

    let (handle, mut events, _task) = spawn_editor(&mock);

    handle.edit(Field::Name, "v1").await.unwrap();
    wait_for_calls(&mock, 1).await;
    handle.edit(Field::Name, "v2").await.unwrap();
    wait_for_calls(&mock, 2).await;

    // The newer commit resolves first: fresh, so it settles the field.
    second_commit.open();
    assert_eq!(
        events.recv().await,
        Some(EditorEvent::FieldSaved {
            field: Field::Name,
            value: "v2".into(),
            total_changes: 1,
        })
    );

    // The older commit resolves stale: the remote did acknowledge it, so it
    // counts, but it must not touch the field's state and emits nothing.
    first_commit.open();
    let snapshot = wait_for_change_count(&handle, 2).await;
    assert_eq!(snapshot.values.name, "v2");
    assert!(snapshot.pending.is_empty());
    assert!(events.try_recv().is_err());
    mock.verify();
}

#[tokio::test]
async fn test_last_write_wins_when_older_completion_lands_first() {
    let mut mock = MockClient::<Game>::new();
    let (expectation, first_commit) = mock.expect_update("42").gated();
    expectation.return_ok(stored_game());
    let (expectation, second_commit) = mock.expect_update("42").gated();
    expectation.return_ok(stored_game());

    let (handle, mut events, _task) = spawn_editor(&mock);

    handle.edit(Field::Name, "v1").await.unwrap();
    wait_for_calls(&mock, 1).await;
    handle.edit(Field::Name, "v2").await.unwrap();
    wait_for_calls(&mock, 2).await;

    // The older commit resolves first: stale already, counted only.
    first_commit.open();
    let snapshot = wait_for_change_count(&handle, 1).await;
    assert_eq!(snapshot.values.name, "v2");
    assert_eq!(snapshot.pending, vec![Field::Name]);
    assert!(events.try_recv().is_err());

    // The newer commit settles the field.
    second_commit.open();
    assert_eq!(
        events.recv().await,
        Some(EditorEvent::FieldSaved {
            field: Field::Name,
            value: "v2".into(),
            total_changes: 2,
        })
    );
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.values.name, "v2");
    assert!(snapshot.pending.is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_failed_commit_reports_once_and_keeps_the_typed_value() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_update("42")
        .return_err(ClientError::Remote { status: 500 });

    let (handle, mut events, _task) = spawn_editor(&mock);

    let outcome = handle.edit(Field::Name, "Renamed").await.unwrap();
    assert_eq!(outcome, EditOutcome::Committing);

    assert_eq!(
        events.recv().await,
        Some(EditorEvent::SaveFailed {
            field: Field::Name,
            value: "Renamed".into(),
            error: ClientError::Remote { status: 500 },
        })
    );

    let snapshot = handle.snapshot().await.unwrap();
    // No rollback, no ledger entry, no retry, session continues.
    assert_eq!(snapshot.values.name, "Renamed");
    assert_eq!(snapshot.change_count, 0);
    assert!(snapshot.pending.is_empty());
    assert!(events.try_recv().is_err());
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_save_all_with_invalid_fields_reports_all_and_calls_nothing() {
    let mock = MockClient::<Game>::new();
    let (handle, _events, _task) = spawn_editor(&mock);

    handle.edit(Field::Platform, "").await.unwrap();
    handle.edit(Field::Name, "").await.unwrap();

    let result = handle.save_all().await;
    let Err(EditorError::Invalid(report)) = result else {
        panic!("expected a validation failure, got {result:?}");
    };
    assert_eq!(report.error(Field::Platform), Some("Platform is required"));
    assert_eq!(report.error(Field::Name), Some("Game name is required"));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_save_all_sends_the_whole_record_and_skips_the_ledger() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_update("42").return_ok(stored_game());

    let (handle, _events, _task) = spawn_editor(&mock);

    let saved = handle.save_all().await.unwrap();
    assert_eq!(saved.id, "42");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        Some(json!({
            "name": "Foo",
            "platform": "PC",
            "released": "2020-01-01T00:00:00Z",
            "genre": "",
            "developer": "",
        }))
    );

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.change_count, 0);
    mock.verify();
}

#[tokio::test]
async fn test_save_all_remote_failure_keeps_the_session() {
    let mut mock = MockClient::<Game>::new();
    mock.expect_update("42")
        .return_err(ClientError::Remote { status: 500 });

    let (handle, _events, _task) = spawn_editor(&mock);

    let result = handle.save_all().await;
    assert_eq!(
        result,
        Err(EditorError::Client(ClientError::Remote { status: 500 }))
    );

    // The session is still alive and editable.
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.values.name, "Foo");
}
