//! 数据库实体与领域模型互转
//!
//! 字段 schema、提交数据、事件载荷以 JSON 文本落库。

use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{LeadlinkerError, Result};
use crate::storage::models::{EventKind, Field, Form, Link, LinkEvent, Submission, TemplateType};
use migration::entities::{form, link, link_event, submission};

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        owner_id: model.owner_id,
        code: model.code,
        is_custom: model.is_custom,
        destination: model.destination,
        form_id: model.form_id,
        title: model.title,
        description: model.description,
        is_active: model.is_active,
        expires_at: model.expires_at,
        click_count: model.click_count.max(0),
        lead_count: model.lead_count.max(0),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 计数器只在插入时写入，更新时交给原子自增
pub fn link_to_active_model(link: &Link, is_new: bool) -> link::ActiveModel {
    link::ActiveModel {
        id: Set(link.id.clone()),
        owner_id: Set(link.owner_id.clone()),
        code: Set(link.code.clone()),
        is_custom: Set(link.is_custom),
        destination: Set(link.destination.clone()),
        form_id: Set(link.form_id.clone()),
        title: Set(link.title.clone()),
        description: Set(link.description.clone()),
        is_active: Set(link.is_active),
        expires_at: Set(link.expires_at),
        click_count: if is_new { Set(link.click_count) } else { NotSet },
        lead_count: if is_new { Set(link.lead_count) } else { NotSet },
        created_at: if is_new { Set(link.created_at) } else { NotSet },
        updated_at: Set(link.updated_at),
    }
}

pub fn model_to_form(model: form::Model) -> Result<Form> {
    let fields: Vec<Field> = serde_json::from_str(&model.fields).map_err(|e| {
        LeadlinkerError::serialization(format!("Corrupt field schema for form {}: {}", model.id, e))
    })?;
    // 未知模板类型按 custom 处理
    let template_type = TemplateType::from_str(&model.template_type).unwrap_or_default();

    Ok(Form {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        fields,
        template_type,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn form_to_active_model(form: &Form, is_new: bool) -> Result<form::ActiveModel> {
    Ok(form::ActiveModel {
        id: Set(form.id.clone()),
        owner_id: Set(form.owner_id.clone()),
        name: Set(form.name.clone()),
        fields: Set(serde_json::to_string(&form.fields)?),
        template_type: Set(form.template_type.to_string()),
        is_active: Set(form.is_active),
        created_at: if is_new { Set(form.created_at) } else { NotSet },
        updated_at: Set(form.updated_at),
    })
}

pub fn model_to_submission(model: submission::Model) -> Result<Submission> {
    let data = serde_json::from_str(&model.data).map_err(|e| {
        LeadlinkerError::serialization(format!("Corrupt submission data {}: {}", model.id, e))
    })?;
    Ok(Submission {
        id: model.id,
        link_id: model.link_id,
        form_id: model.form_id,
        data,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        referrer: model.referrer,
        created_at: model.created_at,
    })
}

/// 事件是只读历史，无法识别的记录跳过而不是让整页失败
pub fn model_to_event(model: link_event::Model) -> Option<LinkEvent> {
    let kind = EventKind::from_str(&model.kind).ok()?;
    let payload = model
        .payload
        .as_deref()
        .and_then(|p| serde_json::from_str(p).ok());
    Some(LinkEvent {
        id: model.id,
        link_id: model.link_id,
        kind,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        referrer: model.referrer,
        payload,
        created_at: model.created_at,
    })
}
