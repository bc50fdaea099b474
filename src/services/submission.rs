//! Form submission
//!
//! Write path behind `POST /submit/{code}`. The submission row is the only
//! hard write; events and the lead counter are best effort.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::resolution::find_live_link;
use super::side_effects::best_effort;
use crate::errors::{LeadlinkerError, Result};
use crate::storage::{
    EventKind, EventStore, Form, FormStore, LinkStore, NewSubmission, RequestMeta, Stores,
    SubmissionData, SubmissionStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub submission_id: String,
    pub destination: String,
}

/// 缺失的必填字段（按表单顺序返回 label）
pub fn missing_required_labels(form: &Form, data: &SubmissionData) -> Vec<String> {
    form.fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| data.get(&field.name).is_none_or(|v| v.trim().is_empty()))
        .map(|field| field.label.clone())
        .collect()
}

pub struct SubmissionService {
    links: Arc<dyn LinkStore>,
    forms: Arc<dyn FormStore>,
    submissions: Arc<dyn SubmissionStore>,
    events: Arc<dyn EventStore>,
}

impl SubmissionService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            links: stores.links.clone(),
            forms: stores.forms.clone(),
            submissions: stores.submissions.clone(),
            events: stores.events.clone(),
        }
    }

    pub async fn submit(
        &self,
        code: &str,
        data: SubmissionData,
        meta: &RequestMeta,
    ) -> Result<SubmissionResult> {
        let link = find_live_link(self.links.as_ref(), code).await?;

        let form = match link.form_id.as_deref() {
            Some(form_id) => self.forms.get_form(form_id).await?,
            None => None,
        }
        .filter(Form::gates_redirect)
        .ok_or_else(|| {
            LeadlinkerError::not_found(format!("No form is attached to short link {}", code))
        })?;

        let missing = missing_required_labels(&form, &data);
        if !missing.is_empty() {
            return Err(LeadlinkerError::missing_fields(missing));
        }

        let submission = self
            .submissions
            .insert_submission(NewSubmission {
                link_id: link.id.clone(),
                form_id: form.id.clone(),
                data,
                meta: meta.clone(),
            })
            .await?;

        best_effort(
            "form_submit event",
            &link.id,
            self.events.record_event(
                &link.id,
                EventKind::FormSubmit,
                meta,
                Some(json!({ "submissionData": submission.data })),
            ),
        )
        .await?;
        best_effort(
            "redirect event",
            &link.id,
            self.events
                .record_event(&link.id, EventKind::Redirect, meta, None),
        )
        .await?;
        best_effort("lead counter", &link.id, self.links.increment_leads(&link.id)).await?;

        info!(
            "Submission {} received for {} (form {})",
            submission.id, link.code, form.id
        );
        Ok(SubmissionResult {
            submission_id: submission.id,
            destination: link.destination,
        })
    }
}
