//! Link management service
//!
//! Owner-scoped CRUD for short links. Links belonging to another owner are
//! reported as not found.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StaticConfig;
use crate::errors::{LeadlinkerError, Result};
use crate::storage::{FormStore, Link, LinkFilter, LinkStore, Stores};
use crate::utils::time_parser::parse_expiry;
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_code, is_reserved_code, is_valid_short_code};

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_PAGE_SIZE: u64 = 100;

// ============ Request DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination URL
    #[serde(alias = "originalUrl")]
    pub destination: String,
    /// Custom alias (generated when absent)
    #[serde(default, alias = "customAlias")]
    pub code: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 or relative ("7d", "1d2h")
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update. `None` keeps the stored value; an empty string clears
/// `form_id`, `title`, `description` and `expires_at`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[serde(default, alias = "originalUrl")]
    pub destination: Option<String>,
    #[serde(default, alias = "customAlias")]
    pub code: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Settings the link service reads from `[links]` and `[routes]`
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub base_url: String,
    pub code_length: usize,
    pub max_generate_attempts: u32,
    pub reserved_prefixes: Vec<String>,
}

impl LinkSettings {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            base_url: config.links.base_url.trim_end_matches('/').to_string(),
            code_length: config
                .links
                .code_length
                .clamp(crate::utils::MIN_CODE_LENGTH, crate::utils::MAX_CODE_LENGTH),
            max_generate_attempts: config.links.max_generate_attempts.max(1),
            reserved_prefixes: vec![
                config.routes.api_prefix.clone(),
                config.routes.health_prefix.clone(),
            ],
        }
    }

    /// 内置保留词或与路由前缀同名的短码
    pub fn is_reserved(&self, code: &str) -> bool {
        let prefixes: Vec<&str> = self.reserved_prefixes.iter().map(String::as_str).collect();
        is_reserved_code(code, &prefixes)
    }
}

fn optional_text(value: Option<String>, field: &str, max: usize) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(LeadlinkerError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(Some(value.to_string()))
}

fn parse_optional_expiry(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => parse_expiry(s).map(Some),
        _ => Ok(None),
    }
}

/// Service for link management operations
pub struct LinkService {
    links: Arc<dyn LinkStore>,
    forms: Arc<dyn FormStore>,
    settings: LinkSettings,
}

impl LinkService {
    pub fn new(stores: &Stores, settings: LinkSettings) -> Self {
        Self {
            links: stores.links.clone(),
            forms: stores.forms.clone(),
            settings,
        }
    }

    /// Public short URL of a link
    pub fn short_url(&self, link: &Link) -> String {
        format!("{}/{}", self.settings.base_url, link.code)
    }

    fn check_custom_code(&self, code: &str) -> Result<()> {
        if !is_valid_short_code(code) {
            return Err(LeadlinkerError::validation(format!(
                "Invalid short code '{}': use 4-20 letters, digits, '-' or '_'",
                code
            )));
        }
        if self.settings.is_reserved(code) {
            return Err(LeadlinkerError::validation(format!(
                "Short code '{}' is reserved",
                code
            )));
        }
        Ok(())
    }

    async fn check_form_owner(&self, owner_id: &str, form_id: &str) -> Result<()> {
        match self.forms.get_form(form_id).await? {
            Some(form) if form.owner_id == owner_id => Ok(()),
            _ => Err(LeadlinkerError::not_found(format!(
                "Form not found: {}",
                form_id
            ))),
        }
    }

    async fn owned_link(&self, owner_id: &str, id: &str) -> Result<Link> {
        self.links
            .get_link(id)
            .await?
            .filter(|link| link.owner_id == owner_id)
            .ok_or_else(|| LeadlinkerError::not_found(format!("Link not found: {}", id)))
    }

    // ============ CRUD Operations ============

    /// Create a new short link
    pub async fn create_link(&self, owner_id: &str, req: CreateLinkRequest) -> Result<Link> {
        let destination =
            validate_url(&req.destination).map_err(|e| LeadlinkerError::validation(e.to_string()))?;
        let title = optional_text(req.title, "Title", MAX_TITLE_LENGTH)?;
        let description = optional_text(req.description, "Description", MAX_DESCRIPTION_LENGTH)?;
        let expires_at = parse_optional_expiry(req.expires_at.as_deref())?;

        let form_id = req
            .form_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        if let Some(form_id) = form_id.as_deref() {
            self.check_form_owner(owner_id, form_id).await?;
        }

        let custom_code = req
            .code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(code) = custom_code.as_deref() {
            self.check_custom_code(code)?;
        }

        let now = Utc::now();
        let mut link = Link {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            code: String::new(),
            is_custom: custom_code.is_some(),
            destination,
            form_id,
            title,
            description,
            is_active: req.is_active.unwrap_or(true),
            expires_at,
            click_count: 0,
            lead_count: 0,
            created_at: now,
            updated_at: now,
        };

        if let Some(code) = custom_code {
            link.code = code;
            self.links.insert_link(&link).await.map_err(|e| match e {
                LeadlinkerError::Conflict(_) => LeadlinkerError::conflict(format!(
                    "Short code '{}' is already taken",
                    link.code
                )),
                other => other,
            })?;
            return Ok(link);
        }

        let attempts = self.settings.max_generate_attempts;
        for attempt in 1..=attempts {
            link.code = generate_random_code(self.settings.code_length);
            if self.settings.is_reserved(&link.code) {
                continue;
            }
            match self.links.insert_link(&link).await {
                Ok(()) => {
                    debug!("Generated code '{}' on attempt {}", link.code, attempt);
                    return Ok(link);
                }
                Err(LeadlinkerError::Conflict(_)) => {
                    warn!(
                        "Generated code '{}' collided (attempt {}/{})",
                        link.code, attempt, attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LeadlinkerError::conflict(format!(
            "Could not generate a unique short code after {} attempts",
            attempts
        )))
    }

    /// Update an existing link
    pub async fn update_link(
        &self,
        owner_id: &str,
        id: &str,
        req: UpdateLinkRequest,
    ) -> Result<Link> {
        let mut link = self.owned_link(owner_id, id).await?;

        if let Some(destination) = req.destination {
            link.destination =
                validate_url(&destination).map_err(|e| LeadlinkerError::validation(e.to_string()))?;
        }

        if let Some(code) = req.code {
            let code = code.trim();
            if code != link.code {
                self.check_custom_code(code)?;
                link.code = code.to_string();
                link.is_custom = true;
            }
        }

        if let Some(form_id) = req.form_id {
            let form_id = form_id.trim();
            if form_id.is_empty() {
                link.form_id = None;
            } else {
                self.check_form_owner(owner_id, form_id).await?;
                link.form_id = Some(form_id.to_string());
            }
        }

        if req.title.is_some() {
            link.title = optional_text(req.title, "Title", MAX_TITLE_LENGTH)?;
        }
        if req.description.is_some() {
            link.description =
                optional_text(req.description, "Description", MAX_DESCRIPTION_LENGTH)?;
        }
        if req.expires_at.is_some() {
            link.expires_at = parse_optional_expiry(req.expires_at.as_deref())?;
        }
        if let Some(is_active) = req.is_active {
            link.is_active = is_active;
        }
        link.updated_at = Utc::now();

        self.links.update_link(&link).await.map_err(|e| match e {
            LeadlinkerError::Conflict(_) => {
                LeadlinkerError::conflict(format!("Short code '{}' is already taken", link.code))
            }
            other => other,
        })?;

        info!("LinkService: updated link {} ({})", link.id, link.code);
        Ok(link)
    }

    /// Delete a link and its submissions; analytics events are kept
    pub async fn delete_link(&self, owner_id: &str, id: &str) -> Result<()> {
        let link = self.owned_link(owner_id, id).await?;
        if !self.links.delete_link(&link.id).await? {
            return Err(LeadlinkerError::not_found(format!("Link not found: {}", id)));
        }
        info!("LinkService: deleted link {} ({})", link.id, link.code);
        Ok(())
    }

    pub async fn get_link(&self, owner_id: &str, id: &str) -> Result<Link> {
        self.owned_link(owner_id, id).await
    }

    /// List links with pagination and filtering, newest first
    pub async fn list_links(
        &self,
        owner_id: &str,
        filter: LinkFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.links
            .list_links(owner_id, &filter, page, page_size)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_prefixes(prefixes: &[&str]) -> LinkSettings {
        LinkSettings {
            base_url: "https://go.test".to_string(),
            code_length: 5,
            max_generate_attempts: 3,
            reserved_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_configured_route_prefixes_are_reserved() {
        let settings = settings_with_prefixes(&["/admin", "/status"]);
        assert!(settings.is_reserved("admin"));
        assert!(settings.is_reserved("STATUS"));
        assert!(settings.is_reserved("submit"));
        assert!(!settings.is_reserved("promo"));
    }

    #[test]
    fn test_builtin_words_reserved_without_prefixes() {
        let settings = settings_with_prefixes(&[]);
        assert!(settings.is_reserved("api"));
        assert!(settings.is_reserved("health"));
        assert!(!settings.is_reserved("admin"));
    }
}
