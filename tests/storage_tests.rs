//! SeaORM storage tests against a temporary SQLite database

mod common;

use serde_json::json;

use leadlinker::errors::LeadlinkerError;
use leadlinker::storage::{
    EventKind, EventStore, FormStore, LinkStore, NewSubmission, SubmissionStore,
};

use common::*;

#[tokio::test]
async fn test_link_round_trip_and_counters() {
    let (storage, _dir) = test_storage().await;
    let mut link = new_link(OWNER, "store1", "https://example.com");
    link.title = Some("Title".to_string());
    storage.insert_link(&link).await.unwrap();

    let found = storage.find_active_by_code("store1").await.unwrap().unwrap();
    assert_eq!(found.id, link.id);
    assert_eq!(found.title.as_deref(), Some("Title"));

    storage.increment_clicks(&link.id).await.unwrap();
    storage.increment_clicks(&link.id).await.unwrap();
    storage.increment_leads(&link.id).await.unwrap();

    // 整行更新不覆盖计数器
    link.destination = "https://example.org".to_string();
    storage.update_link(&link).await.unwrap();

    let stored = storage.get_link(&link.id).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 2);
    assert_eq!(stored.lead_count, 1);
    assert_eq!(stored.destination, "https://example.org");
}

#[tokio::test]
async fn test_inactive_links_are_not_found_by_code() {
    let (storage, _dir) = test_storage().await;
    let mut link = new_link(OWNER, "paused", "https://example.com");
    link.is_active = false;
    storage.insert_link(&link).await.unwrap();

    assert!(storage.find_active_by_code("paused").await.unwrap().is_none());
    assert!(storage.get_link(&link.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_code_is_conflict() {
    let (storage, _dir) = test_storage().await;
    storage
        .insert_link(&new_link(OWNER, "dupe01", "https://example.com"))
        .await
        .unwrap();
    let err = storage
        .insert_link(&new_link(OTHER_OWNER, "dupe01", "https://example.org"))
        .await
        .unwrap_err();
    assert!(matches!(err, LeadlinkerError::Conflict(_)));
}

#[tokio::test]
async fn test_form_fields_round_trip() {
    let (storage, _dir) = test_storage().await;
    let form = new_form(OWNER, vec![email_field(), name_field(false)]);
    storage.insert_form(&form).await.unwrap();

    let stored = storage.get_form(&form.id).await.unwrap().unwrap();
    assert_eq!(stored.fields, form.fields);
    assert_eq!(storage.list_forms(OWNER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_link_removes_submissions_and_keeps_events() {
    let (storage, _dir) = test_storage().await;
    let (link, form) =
        seed_gated_link(&storage, "cascade", "https://example.com", vec![email_field()]).await;

    storage
        .insert_submission(NewSubmission {
            link_id: link.id.clone(),
            form_id: form.id.clone(),
            data: [("email".to_string(), "a@b.com".to_string())]
                .into_iter()
                .collect(),
            meta: meta(),
        })
        .await
        .unwrap();
    storage
        .record_event(
            &link.id,
            EventKind::FormSubmit,
            &meta(),
            Some(json!({ "submissionData": { "email": "a@b.com" } })),
        )
        .await
        .unwrap();
    assert_eq!(storage.count_for_form(&form.id).await.unwrap(), 1);

    assert!(storage.delete_link(&link.id).await.unwrap());
    assert!(!storage.delete_link(&link.id).await.unwrap());

    assert!(storage.get_link(&link.id).await.unwrap().is_none());
    assert_eq!(storage.count_for_form(&form.id).await.unwrap(), 0);
    let events = storage.recent_events(&link.id, 10).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload.as_ref().unwrap()["submissionData"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_delete_form_detaches_links() {
    let (storage, _dir) = test_storage().await;
    let (link, form) =
        seed_gated_link(&storage, "detach", "https://example.com", vec![email_field()]).await;

    assert!(storage.delete_form(&form.id).await.unwrap());
    assert!(storage.get_form(&form.id).await.unwrap().is_none());
    let stored = storage.get_link(&link.id).await.unwrap().unwrap();
    assert!(stored.form_id.is_none());
}

#[tokio::test]
async fn test_events_are_counted_by_kind_newest_first() {
    let (storage, _dir) = test_storage().await;
    let link = new_link(OWNER, "events", "https://example.com");
    storage.insert_link(&link).await.unwrap();

    for kind in [EventKind::Click, EventKind::Click, EventKind::Redirect] {
        storage
            .record_event(&link.id, kind, &meta(), None)
            .await
            .unwrap();
    }

    let counts = storage.count_by_kind(&link.id).await.unwrap();
    assert_eq!(counts.get(&EventKind::Click), Some(&2));
    assert_eq!(counts.get(&EventKind::Redirect), Some(&1));

    let events = storage.recent_events(&link.id, 2).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].user_agent.as_deref(), Some("test-agent"));
}
