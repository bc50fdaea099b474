//! Form management service

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::templates::{FormTemplate, builtin_templates};
use crate::errors::{LeadlinkerError, Result};
use crate::storage::{Field, FieldKind, Form, FormStore, Stores, SubmissionStore, TemplateType};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_LABEL_LENGTH: usize = 255;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub template_type: Option<TemplateType>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Err(LeadlinkerError::validation(format!(
            "Form name must be 1-{} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

/// 字段 schema 校验：至少一个字段，name 非空且唯一，label 长度合法，下拉框至少一个选项
pub fn validate_fields(fields: &[Field]) -> Result<()> {
    if fields.is_empty() {
        return Err(LeadlinkerError::validation("A form needs at least one field"));
    }

    let mut seen = HashSet::new();
    for (index, field) in fields.iter().enumerate() {
        let name = field.name.trim();
        if name.is_empty() {
            return Err(LeadlinkerError::validation(format!(
                "Field #{} has an empty name",
                index + 1
            )));
        }
        if !seen.insert(name) {
            return Err(LeadlinkerError::validation(format!(
                "Duplicate field name '{}'",
                name
            )));
        }
        let label_len = field.label.trim().chars().count();
        if label_len == 0 || label_len > MAX_LABEL_LENGTH {
            return Err(LeadlinkerError::validation(format!(
                "Label of field '{}' must be 1-{} characters",
                name, MAX_LABEL_LENGTH
            )));
        }
        if let FieldKind::SingleSelect { options } = &field.kind
            && options.is_empty()
        {
            return Err(LeadlinkerError::validation(format!(
                "Select field '{}' needs at least one option",
                name
            )));
        }
    }
    Ok(())
}

fn normalize_fields(fields: Vec<Field>) -> Vec<Field> {
    fields
        .into_iter()
        .map(|mut field| {
            field.name = field.name.trim().to_string();
            field.label = field.label.trim().to_string();
            field
        })
        .collect()
}

pub struct FormService {
    forms: Arc<dyn FormStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl FormService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            forms: stores.forms.clone(),
            submissions: stores.submissions.clone(),
        }
    }

    async fn owned_form(&self, owner_id: &str, id: &str) -> Result<Form> {
        self.forms
            .get_form(id)
            .await?
            .filter(|form| form.owner_id == owner_id)
            .ok_or_else(|| LeadlinkerError::not_found(format!("Form not found: {}", id)))
    }

    pub async fn create_form(&self, owner_id: &str, req: CreateFormRequest) -> Result<Form> {
        let name = validate_name(&req.name)?;
        let fields = normalize_fields(req.fields);
        validate_fields(&fields)?;

        let now = Utc::now();
        let form = Form {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name,
            fields,
            template_type: req.template_type,
            is_active: req.is_active,
            created_at: now,
            updated_at: now,
        };
        self.forms.insert_form(&form).await?;
        Ok(form)
    }

    pub async fn update_form(
        &self,
        owner_id: &str,
        id: &str,
        req: UpdateFormRequest,
    ) -> Result<Form> {
        let mut form = self.owned_form(owner_id, id).await?;

        if let Some(name) = req.name {
            form.name = validate_name(&name)?;
        }

        if let Some(fields) = req.fields {
            let fields = normalize_fields(fields);
            validate_fields(&fields)?;

            let kept: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            let removed: Vec<&str> = form
                .fields
                .iter()
                .map(|f| f.name.as_str())
                .filter(|name| !kept.contains(name))
                .collect();
            if !removed.is_empty() && self.submissions.count_for_form(&form.id).await? > 0 {
                return Err(LeadlinkerError::conflict(format!(
                    "Field(s) {} are referenced by existing submissions and cannot be removed or renamed",
                    removed.join(", ")
                )));
            }
            form.fields = fields;
        }

        if let Some(template_type) = req.template_type {
            form.template_type = template_type;
        }
        if let Some(is_active) = req.is_active {
            form.is_active = is_active;
        }
        form.updated_at = Utc::now();

        self.forms.update_form(&form).await?;
        info!("FormService: updated form {}", form.id);
        Ok(form)
    }

    /// Delete a form; links using it fall back to direct redirects
    pub async fn delete_form(&self, owner_id: &str, id: &str) -> Result<()> {
        let form = self.owned_form(owner_id, id).await?;
        if !self.forms.delete_form(&form.id).await? {
            return Err(LeadlinkerError::not_found(format!("Form not found: {}", id)));
        }
        info!("FormService: deleted form {}", form.id);
        Ok(())
    }

    pub async fn get_form(&self, owner_id: &str, id: &str) -> Result<Form> {
        self.owned_form(owner_id, id).await
    }

    pub async fn list_forms(&self, owner_id: &str) -> Result<Vec<Form>> {
        self.forms.list_forms(owner_id).await
    }

    pub fn templates(&self) -> Vec<FormTemplate> {
        builtin_templates()
    }
}
