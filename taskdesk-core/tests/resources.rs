mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use taskdesk_core::batch::{bulk_delete, bulk_set_status, load_calendar, load_dashboard};
use taskdesk_core::calendar::{MonthGrid, YearMonth};
use taskdesk_core::model::{ImageChange, ImageFile, TodoDraft};
use taskdesk_core::views::{StatusBucket, task_stats};
use taskdesk_core::{ApiClient, MemoryTokenStore, StoredTokens, TaskdeskError};

use common::MockApi;

async fn signed_in(api: &Arc<MockApi>) -> ApiClient {
    let base = common::spawn(api.clone()).await;
    common::client(
        &base,
        Arc::new(MemoryTokenStore::new(StoredTokens::new("A1", "R1"))),
    )
}

fn draft(image: ImageChange) -> TodoDraft {
    TodoDraft {
        title: "Scan receipts".into(),
        description: "March".into(),
        status_id: 1,
        priority_id: 2,
        due_date: NaiveDate::from_ymd_opt(2025, 3, 31),
        image,
    }
}

#[tokio::test]
async fn uploads_go_out_as_multipart() {
    let api = MockApi::new();
    let client = signed_in(&api).await;

    let file = ImageFile::new("receipt.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    client
        .todos()
        .create(&draft(ImageChange::Upload(file)))
        .await
        .unwrap();

    let upload = api.last_upload().unwrap();
    assert!(upload.content_type.starts_with("multipart/form-data; boundary="));
    assert!(upload.body.contains(r#"name="image"; filename="receipt.png""#));
    assert!(upload.body.contains(r#"name="due_date""#));
    assert!(upload.body.contains("2025-03-31"));
}

#[tokio::test]
async fn plain_edits_go_out_as_json() {
    let api = MockApi::new();
    let client = signed_in(&api).await;

    client.todos().update(2, &draft(ImageChange::Keep)).await.unwrap();

    let upload = api.last_upload().unwrap();
    assert_eq!(upload.content_type, "application/json");
    let body: serde_json::Value = serde_json::from_str(&upload.body).unwrap();
    assert_eq!(body["status_id"], 1);
    assert_eq!(body["due_date"], "2025-03-31");
    assert!(body.get("image").is_none());
}

#[tokio::test]
async fn image_removal_sends_an_empty_field() {
    let api = MockApi::new();
    let client = signed_in(&api).await;

    client.todos().update(2, &draft(ImageChange::Remove)).await.unwrap();

    let upload = api.last_upload().unwrap();
    assert!(upload.content_type.starts_with("multipart/form-data"));
    assert!(upload.body.contains(r#"name="image""#));
    assert!(!upload.body.contains("filename="));
}

#[tokio::test]
async fn multipart_is_replayed_after_refresh() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    api.expire_access();

    let file = ImageFile::new("a.png", "image/png", vec![1, 2, 3]);
    client
        .todos()
        .update(1, &draft(ImageChange::Upload(file)))
        .await
        .unwrap();

    assert_eq!(api.refresh_count(), 1);
    let upload = api.last_upload().unwrap();
    assert!(upload.content_type.starts_with("multipart/form-data"));
    assert!(upload.body.contains(r#"filename="a.png""#));
}

#[tokio::test]
async fn dashboard_loads_everything_together() {
    let api = MockApi::new();
    let client = signed_in(&api).await;

    let data = load_dashboard(&client).await.unwrap();
    assert_eq!(data.todos.len(), 3);
    assert_eq!(data.statuses.len(), 3);
    assert_eq!(data.priorities.len(), 3);

    let catalog = data.catalog();
    assert_eq!(catalog.status_name(&data.todos[1]), "In Progress");
    assert_eq!(catalog.status_bucket(&data.todos[2]), Some(StatusBucket::Completed));

    let stats = task_stats(&data.todos, catalog);
    assert_eq!((stats.completed, stats.in_progress, stats.not_started), (33, 33, 33));
}

#[tokio::test]
async fn dashboard_is_all_or_nothing() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    api.fail_priorities();

    match load_dashboard(&client).await {
        Err(TaskdeskError::Server { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn calendar_data_lands_on_the_grid() {
    let api = MockApi::new();
    let client = signed_in(&api).await;

    let data = load_calendar(&client).await.unwrap();
    let march = YearMonth::new(2025, 3).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let grid = MonthGrid::build(march, today, &data.events, &data.todos);

    let cell = grid.cell(today).unwrap();
    assert!(cell.is_today);
    assert_eq!(cell.events.len(), 2);

    let due = grid.cell(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()).unwrap();
    assert_eq!(due.todos.len(), 1);
}

#[tokio::test]
async fn bulk_delete_reports_partial_failure() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    api.fail_todo(3);

    match bulk_delete(&client, &[1, 2, 3]).await {
        Err(TaskdeskError::Bulk { failed, total }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 3);
        }
        other => panic!("expected bulk failure, got {other:?}"),
    }

    // Every request was still sent.
    assert_eq!(api.todo_writes.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test]
async fn bulk_status_change() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    let todos = client.todos().list().await.unwrap();

    assert_eq!(bulk_set_status(&client, &todos, &[1, 2], 3).await.unwrap(), 2);

    let body: serde_json::Value = serde_json::from_str(&api.last_upload().unwrap().body).unwrap();
    assert_eq!(body["status_id"], 3);

    // An id that is not loaded counts as a failure.
    match bulk_set_status(&client, &todos, &[1, 42], 3).await {
        Err(TaskdeskError::Bulk { failed, total }) => assert_eq!((failed, total), (1, 2)),
        other => panic!("expected bulk failure, got {other:?}"),
    }
}

#[tokio::test]
async fn deletes_ignore_a_json_success_body() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    api.delete_with_message();

    client.todos().delete(1).await.unwrap();
    client.statuses().delete(2).await.unwrap();
    client.priorities().delete(3).await.unwrap();
    client.events().delete(1).await.unwrap();

    assert_eq!(bulk_delete(&client, &[1, 2, 3]).await.unwrap(), 3);
}

#[tokio::test]
async fn delete_failures_still_surface() {
    let api = MockApi::new();
    let client = signed_in(&api).await;
    api.fail_todo(2);

    match client.todos().delete(2).await {
        Err(TaskdeskError::Server { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected server error, got {other:?}"),
    }
}
