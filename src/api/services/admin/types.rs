//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::{Link, LinkFilter};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetLinksQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    pub only_active: Option<bool>,
    pub only_expired: Option<bool>,
}

impl GetLinksQuery {
    pub const DEFAULT_PAGE_SIZE: u64 = 20;

    pub fn filter(&self) -> LinkFilter {
        LinkFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            only_active: self.only_active.unwrap_or(false),
            only_expired: self.only_expired.unwrap_or(false),
        }
    }
}

/// 链接 + 完整短链
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    #[serde(flatten)]
    pub link: Link,
    pub short_url: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Clone, Debug)]
pub struct PaginatedLinks {
    pub items: Vec<LinkView>,
    pub pagination: PaginationInfo,
}
