//! 存储接口
//!
//! 服务层只依赖这些 trait，具体实现（`SeaOrmStorage`）在启动时注入。

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::models::{
    EventKind, Form, Link, LinkEvent, LinkFilter, NewSubmission, RequestMeta, Submission,
};
use crate::errors::Result;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// 按短码查找启用中的链接（不判断过期）
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>>;

    async fn get_link(&self, id: &str) -> Result<Option<Link>>;

    /// 写入新链接；短码冲突返回 `Conflict`
    async fn insert_link(&self, link: &Link) -> Result<()>;

    /// 整行更新（计数器除外）；短码冲突返回 `Conflict`
    async fn update_link(&self, link: &Link) -> Result<()>;

    /// 删除链接及其提交记录，保留分析事件
    async fn delete_link(&self, id: &str) -> Result<bool>;

    /// 分页列出某用户的链接，按创建时间倒序；返回 (当前页, 总数)
    async fn list_links(
        &self,
        owner_id: &str,
        filter: &LinkFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)>;

    async fn increment_clicks(&self, id: &str) -> Result<()>;

    async fn increment_leads(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait FormStore: Send + Sync {
    async fn get_form(&self, id: &str) -> Result<Option<Form>>;

    async fn insert_form(&self, form: &Form) -> Result<()>;

    async fn update_form(&self, form: &Form) -> Result<()>;

    /// 删除表单，并把引用它的链接的 form_id 置空
    async fn delete_form(&self, id: &str) -> Result<bool>;

    async fn list_forms(&self, owner_id: &str) -> Result<Vec<Form>>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission>;

    async fn recent_submissions(&self, link_id: &str, limit: u64) -> Result<Vec<Submission>>;

    async fn count_for_form(&self, form_id: &str) -> Result<u64>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn record_event(
        &self,
        link_id: &str,
        kind: EventKind,
        meta: &RequestMeta,
        payload: Option<serde_json::Value>,
    ) -> Result<()>;

    async fn recent_events(&self, link_id: &str, limit: u64) -> Result<Vec<LinkEvent>>;

    async fn count_by_kind(&self, link_id: &str) -> Result<BTreeMap<EventKind, u64>>;
}

/// 存储健康检查
#[async_trait]
pub trait StorageHealth: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    fn backend_name(&self) -> &str;
}
