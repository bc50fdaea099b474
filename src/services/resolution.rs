//! Short-code resolution
//!
//! Read path behind `GET /{code}`: look the link up, reject expired ones
//! before anything is recorded, count the click, then decide between a
//! direct redirect and a form page.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::side_effects::best_effort;
use crate::errors::{LeadlinkerError, Result};
use crate::storage::{EventKind, EventStore, Form, FormStore, Link, LinkStore, RequestMeta, Stores};
use crate::utils::is_valid_short_code;

/// 解析结果
#[derive(Debug, Clone)]
pub enum Resolution {
    /// 未挂载可用表单，直接跳转
    DirectRedirect { destination: String },
    /// 展示表单，提交后再跳转
    FormPresentation { link: Link, form: Form },
}

/// 查找可解析的链接：格式合法、已启用、未过期
///
/// 格式不合法时不访问存储。
pub(crate) async fn find_live_link(links: &dyn LinkStore, code: &str) -> Result<Link> {
    if !is_valid_short_code(code) {
        return Err(LeadlinkerError::not_found(format!(
            "Short link not found: {}",
            code
        )));
    }

    let link = links
        .find_active_by_code(code)
        .await?
        .ok_or_else(|| LeadlinkerError::not_found(format!("Short link not found: {}", code)))?;

    if link.is_expired_at(Utc::now()) {
        return Err(LeadlinkerError::expired(format!(
            "Short link has expired: {}",
            code
        )));
    }
    Ok(link)
}

pub struct ResolutionService {
    links: Arc<dyn LinkStore>,
    forms: Arc<dyn FormStore>,
    events: Arc<dyn EventStore>,
}

impl ResolutionService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            links: stores.links.clone(),
            forms: stores.forms.clone(),
            events: stores.events.clone(),
        }
    }

    pub async fn resolve(&self, code: &str, meta: &RequestMeta) -> Result<Resolution> {
        let link = find_live_link(self.links.as_ref(), code).await?;

        best_effort(
            "click event",
            &link.id,
            self.events.record_event(&link.id, EventKind::Click, meta, None),
        )
        .await?;
        best_effort(
            "click counter",
            &link.id,
            self.links.increment_clicks(&link.id),
        )
        .await?;

        let form = match link.form_id.as_deref() {
            Some(form_id) => self.forms.get_form(form_id).await?,
            None => None,
        };

        match form.filter(Form::gates_redirect) {
            Some(form) => {
                best_effort(
                    "form_view event",
                    &link.id,
                    self.events
                        .record_event(&link.id, EventKind::FormView, meta, None),
                )
                .await?;
                debug!("Presenting form {} for code {}", form.id, link.code);
                Ok(Resolution::FormPresentation { link, form })
            }
            None => {
                best_effort(
                    "redirect event",
                    &link.id,
                    self.events
                        .record_event(&link.id, EventKind::Redirect, meta, None),
                )
                .await?;
                debug!("Redirecting {} -> {}", link.code, link.destination);
                Ok(Resolution::DirectRedirect {
                    destination: link.destination,
                })
            }
        }
    }
}
