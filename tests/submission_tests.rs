//! SubmissionService tests

mod common;

use std::sync::Arc;

use leadlinker::errors::LeadlinkerError;
use leadlinker::services::SubmissionService;
use leadlinker::storage::{
    EventKind, EventStore, LinkStore, Stores, SubmissionData, SubmissionStore,
};

use common::*;

fn data(pairs: &[(&str, &str)]) -> SubmissionData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_missing_required_fields_use_labels_in_form_order() {
    let (storage, _dir) = test_storage().await;
    let (link, _) = seed_gated_link(
        &storage,
        "lead01",
        "https://example.com/thanks",
        vec![name_field(true), email_field()],
    )
    .await;

    let service = SubmissionService::new(&stores(&storage));
    let err = service
        .submit("lead01", data(&[("name", "   ")]), &meta())
        .await
        .unwrap_err();

    match err {
        LeadlinkerError::MissingFields(labels) => {
            assert_eq!(labels, vec!["Full Name".to_string(), "Email".to_string()])
        }
        other => panic!("expected MissingFields, got {:?}", other),
    }

    // 校验失败不落库、不计数
    assert!(storage.recent_submissions(&link.id, 10).await.unwrap().is_empty());
    let stored = storage.get_link(&link.id).await.unwrap().unwrap();
    assert_eq!(stored.lead_count, 0);
}

#[tokio::test]
async fn test_successful_submission_is_stored_and_counted() {
    let (storage, _dir) = test_storage().await;
    let (link, form) = seed_gated_link(
        &storage,
        "lead01",
        "https://example.com/thanks",
        vec![email_field(), name_field(false)],
    )
    .await;

    let service = SubmissionService::new(&stores(&storage));
    let result = service
        .submit(
            "lead01",
            data(&[("email", "a@b.com"), ("extra", "kept")]),
            &meta(),
        )
        .await
        .unwrap();
    assert_eq!(result.destination, "https://example.com/thanks");

    let submissions = storage.recent_submissions(&link.id, 10).await.unwrap();
    assert_eq!(submissions.len(), 1);
    let submission = &submissions[0];
    assert_eq!(submission.id, result.submission_id);
    assert_eq!(submission.form_id, form.id);
    assert_eq!(submission.data["email"], "a@b.com");
    assert_eq!(submission.data["extra"], "kept");
    assert_eq!(submission.ip_address.as_deref(), Some("203.0.113.7"));

    let stored = storage.get_link(&link.id).await.unwrap().unwrap();
    assert_eq!(stored.lead_count, 1);
    assert_eq!(stored.click_count, 0);

    let counts = storage.count_by_kind(&link.id).await.unwrap();
    assert_eq!(counts.get(&EventKind::FormSubmit), Some(&1));
    assert_eq!(counts.get(&EventKind::Redirect), Some(&1));

    let events = storage.recent_events(&link.id, 10).await.unwrap();
    let submit_event = events
        .iter()
        .find(|e| e.kind == EventKind::FormSubmit)
        .unwrap();
    let payload = submit_event.payload.as_ref().unwrap();
    assert_eq!(payload["submissionData"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_submit_to_link_without_form_is_not_found() {
    let (storage, _dir) = test_storage().await;
    storage
        .insert_link(&new_link(OWNER, "plain1", "https://example.com"))
        .await
        .unwrap();

    let service = SubmissionService::new(&stores(&storage));
    let err = service
        .submit("plain1", data(&[("email", "a@b.com")]), &meta())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadlinkerError::NotFound(_)));

    let err = service
        .submit("missing", SubmissionData::new(), &meta())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadlinkerError::NotFound(_)));
}

#[tokio::test]
async fn test_submit_to_expired_link_is_gone_before_validation() {
    let (storage, _dir) = test_storage().await;
    let (mut link, _) =
        seed_gated_link(&storage, "old1", "https://example.com", vec![email_field()]).await;
    link.expires_at = Some(expired_at());
    storage.update_link(&link).await.unwrap();

    let service = SubmissionService::new(&stores(&storage));
    let err = service
        .submit("old1", SubmissionData::new(), &meta())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadlinkerError::Expired(_)));
    assert!(storage.count_by_kind(&link.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submission_store_failure_surfaces() {
    let (storage, _dir) = test_storage().await;
    seed_gated_link(&storage, "lead02", "https://example.com", vec![email_field()]).await;

    let stores = Stores {
        submissions: Arc::new(FailingSubmissions),
        ..stores(&storage)
    };
    let service = SubmissionService::new(&stores);
    let err = service
        .submit("lead02", data(&[("email", "a@b.com")]), &meta())
        .await
        .unwrap_err();
    assert!(err.is_storage());
    assert_eq!(err.http_status().as_u16(), 500);
}

#[tokio::test]
async fn test_best_effort_failures_do_not_change_outcome() {
    let (storage, _dir) = test_storage().await;
    let (link, _) =
        seed_gated_link(&storage, "lead03", "https://example.com", vec![email_field()]).await;

    let stores = Stores {
        links: Arc::new(FailingCounters(storage.clone())),
        events: Arc::new(FailingEvents),
        ..stores(&storage)
    };
    let service = SubmissionService::new(&stores);
    let result = service
        .submit("lead03", data(&[("email", "a@b.com")]), &meta())
        .await
        .unwrap();
    assert_eq!(result.destination, "https://example.com");

    // 提交本身已落库，只是计数没更新
    assert_eq!(storage.recent_submissions(&link.id, 10).await.unwrap().len(), 1);
    let stored = storage.get_link(&link.id).await.unwrap().unwrap();
    assert_eq!(stored.lead_count, 0);
}

#[tokio::test]
async fn test_form_store_failure_surfaces() {
    let (storage, _dir) = test_storage().await;
    seed_gated_link(&storage, "lead03", "https://example.com", vec![email_field()]).await;

    let stores = Stores {
        forms: Arc::new(FailingForms),
        ..stores(&storage)
    };
    let service = SubmissionService::new(&stores);
    let err = service
        .submit("lead03", data(&[("email", "a@b.com")]), &meta())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadlinkerError::DatabaseOperation(_)));
}
