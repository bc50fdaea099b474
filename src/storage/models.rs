//! 存储层领域模型
//!
//! 与数据库实体（`migration::entities`）分离，由 `backend::converters` 负责互转。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 短链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub owner_id: String,
    pub code: String,
    pub is_custom: bool,
    pub destination: String,
    pub form_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub lead_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// 过期时间已过则永久不可解析，与 is_active 无关
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// 表单模板类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemplateType {
    Contact,
    Newsletter,
    Demo,
    #[default]
    Custom,
}

/// 下拉选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// 字段类型；single_select 额外携带选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    #[serde(alias = "text")]
    ShortText,
    Email,
    Phone,
    #[serde(alias = "textarea")]
    MultiLineText,
    #[serde(alias = "select")]
    SingleSelect { options: Vec<SelectOption> },
    Checkbox,
}

/// 表单字段
///
/// `name` 是提交数据的键，一旦被提交引用就不能再改名或删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(alias = "id")]
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// 线索收集表单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub fields: Vec<Field>,
    pub template_type: TemplateType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// 启用且至少有一个字段时才拦截跳转
    pub fn gates_redirect(&self) -> bool {
        self.is_active && !self.fields.is_empty()
    }
}

/// 提交数据：字段名 → 字符串值，未知字段原样保留
pub type SubmissionData = BTreeMap<String, String>;

/// 请求方元数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// 表单提交记录（不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub link_id: String,
    pub form_id: String,
    pub data: SubmissionData,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 待写入的提交
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub link_id: String,
    pub form_id: String,
    pub data: SubmissionData,
    pub meta: RequestMeta,
}

/// 分析事件类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Click,
    FormView,
    FormSubmit,
    Redirect,
}

/// 分析事件（只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEvent {
    pub id: String,
    pub link_id: String,
    pub kind: EventKind,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// 链接列表过滤条件
#[derive(Default, Clone, Debug)]
pub struct LinkFilter {
    /// 模糊匹配 code / destination / title
    pub search: Option<String>,
    /// 只返回未过期的链接
    pub only_active: bool,
    /// 只返回已过期的链接
    pub only_expired: bool,
}
