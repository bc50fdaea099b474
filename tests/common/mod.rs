//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use leadlinker::config::DatabaseConfig;
use leadlinker::errors::{LeadlinkerError, Result};
use leadlinker::services::LinkSettings;
use leadlinker::storage::{
    EventKind, EventStore, Field, FieldKind, Form, FormStore, Link, LinkEvent, LinkFilter,
    LinkStore, NewSubmission, RequestMeta, SeaOrmStorage, Stores, Submission, SubmissionStore,
    TemplateType,
};

pub const OWNER: &str = "user-1";
pub const OTHER_OWNER: &str = "user-2";

/// Fresh SQLite database in a temp dir, migrated
pub async fn test_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}", db_path.display()),
        ..Default::default()
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

pub fn test_settings() -> LinkSettings {
    LinkSettings {
        base_url: "https://go.test".to_string(),
        code_length: 6,
        max_generate_attempts: 5,
        reserved_prefixes: vec!["/api".to_string(), "/health".to_string()],
    }
}

pub fn meta() -> RequestMeta {
    RequestMeta {
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: Some("test-agent".to_string()),
        referrer: None,
    }
}

pub fn email_field() -> Field {
    Field {
        name: "email".to_string(),
        label: "Email".to_string(),
        required: true,
        placeholder: None,
        kind: FieldKind::Email,
    }
}

pub fn name_field(required: bool) -> Field {
    Field {
        name: "name".to_string(),
        label: "Full Name".to_string(),
        required,
        placeholder: Some("Jane Doe".to_string()),
        kind: FieldKind::ShortText,
    }
}

pub fn new_form(owner: &str, fields: Vec<Field>) -> Form {
    let now = Utc::now();
    Form {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        name: "Lead form".to_string(),
        fields,
        template_type: TemplateType::Custom,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn new_link(owner: &str, code: &str, destination: &str) -> Link {
    let now = Utc::now();
    Link {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.to_string(),
        code: code.to_string(),
        is_custom: true,
        destination: destination.to_string(),
        form_id: None,
        title: None,
        description: None,
        is_active: true,
        expires_at: None,
        click_count: 0,
        lead_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn expired_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Insert a form and a link gated by it
pub async fn seed_gated_link(
    storage: &SeaOrmStorage,
    code: &str,
    destination: &str,
    fields: Vec<Field>,
) -> (Link, Form) {
    let form = new_form(OWNER, fields);
    storage.insert_form(&form).await.unwrap();
    let mut link = new_link(OWNER, code, destination);
    link.form_id = Some(form.id.clone());
    storage.insert_link(&link).await.unwrap();
    (link, form)
}

fn storage_down() -> LeadlinkerError {
    LeadlinkerError::database_operation("simulated storage outage")
}

/// Event store whose writes always fail
pub struct FailingEvents;

#[async_trait]
impl EventStore for FailingEvents {
    async fn record_event(
        &self,
        _link_id: &str,
        _kind: EventKind,
        _meta: &RequestMeta,
        _payload: Option<serde_json::Value>,
    ) -> Result<()> {
        Err(storage_down())
    }

    async fn recent_events(&self, _link_id: &str, _limit: u64) -> Result<Vec<LinkEvent>> {
        Err(storage_down())
    }

    async fn count_by_kind(&self, _link_id: &str) -> Result<BTreeMap<EventKind, u64>> {
        Err(storage_down())
    }
}

/// Real link store whose counter updates fail
pub struct FailingCounters(pub Arc<SeaOrmStorage>);

#[async_trait]
impl LinkStore for FailingCounters {
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>> {
        self.0.find_active_by_code(code).await
    }

    async fn get_link(&self, id: &str) -> Result<Option<Link>> {
        self.0.get_link(id).await
    }

    async fn insert_link(&self, link: &Link) -> Result<()> {
        self.0.insert_link(link).await
    }

    async fn update_link(&self, link: &Link) -> Result<()> {
        self.0.update_link(link).await
    }

    async fn delete_link(&self, id: &str) -> Result<bool> {
        self.0.delete_link(id).await
    }

    async fn list_links(
        &self,
        owner_id: &str,
        filter: &LinkFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)> {
        self.0.list_links(owner_id, filter, page, page_size).await
    }

    async fn increment_clicks(&self, _id: &str) -> Result<()> {
        Err(storage_down())
    }

    async fn increment_leads(&self, _id: &str) -> Result<()> {
        Err(storage_down())
    }
}

/// Submission store that cannot persist anything
pub struct FailingSubmissions;

#[async_trait]
impl SubmissionStore for FailingSubmissions {
    async fn insert_submission(&self, _submission: NewSubmission) -> Result<Submission> {
        Err(storage_down())
    }

    async fn recent_submissions(&self, _link_id: &str, _limit: u64) -> Result<Vec<Submission>> {
        Err(storage_down())
    }

    async fn count_for_form(&self, _form_id: &str) -> Result<u64> {
        Err(storage_down())
    }
}

/// Form store that is unreachable
pub struct FailingForms;

#[async_trait]
impl FormStore for FailingForms {
    async fn get_form(&self, _id: &str) -> Result<Option<Form>> {
        Err(storage_down())
    }

    async fn insert_form(&self, _form: &Form) -> Result<()> {
        Err(storage_down())
    }

    async fn update_form(&self, _form: &Form) -> Result<()> {
        Err(storage_down())
    }

    async fn delete_form(&self, _id: &str) -> Result<bool> {
        Err(storage_down())
    }

    async fn list_forms(&self, _owner_id: &str) -> Result<Vec<Form>> {
        Err(storage_down())
    }
}

/// Event store that rejects writes with a non-storage error
pub struct BrokenPayloadEvents;

#[async_trait]
impl EventStore for BrokenPayloadEvents {
    async fn record_event(
        &self,
        _link_id: &str,
        _kind: EventKind,
        _meta: &RequestMeta,
        _payload: Option<serde_json::Value>,
    ) -> Result<()> {
        Err(LeadlinkerError::serialization("payload could not be encoded"))
    }

    async fn recent_events(&self, _link_id: &str, _limit: u64) -> Result<Vec<LinkEvent>> {
        Ok(Vec::new())
    }

    async fn count_by_kind(&self, _link_id: &str) -> Result<BTreeMap<EventKind, u64>> {
        Ok(BTreeMap::new())
    }
}

pub fn stores(storage: &Arc<SeaOrmStorage>) -> Stores {
    Stores::from_backend(storage.clone())
}

/// Stores with the event store replaced
pub fn stores_with_events(storage: &Arc<SeaOrmStorage>, events: Arc<dyn EventStore>) -> Stores {
    Stores {
        events,
        ..Stores::from_backend(storage.clone())
    }
}

pub fn form_store(storage: &Arc<SeaOrmStorage>) -> Arc<dyn FormStore> {
    storage.clone()
}
