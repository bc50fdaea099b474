//! Admin API 链接 CRUD 操作

use actix_web::{HttpResponse, Responder, web};
use tracing::{info, trace};

use crate::api::AppState;
use crate::api::middleware::OwnerId;
use crate::services::{CreateLinkRequest, UpdateLinkRequest};
use crate::storage::Link;

use super::helpers::{api_result, created_result, error_from_leadlinker, success_response};
use super::types::{GetLinksQuery, LinkView, PaginatedLinks, PaginationInfo};

fn view(state: &AppState, link: Link) -> LinkView {
    LinkView {
        short_url: state.links.short_url(&link),
        link,
    }
}

/// 获取当前用户的链接（支持分页和过滤）
pub async fn get_all_links(
    owner: web::ReqData<OwnerId>,
    query: web::Query<GetLinksQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    trace!("Admin API: list links for {} with {:?}", owner.0, query);

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(GetLinksQuery::DEFAULT_PAGE_SIZE)
        .clamp(1, crate::services::MAX_PAGE_SIZE);

    match state
        .links
        .list_links(&owner.0, query.filter(), page, page_size)
        .await
    {
        Ok((links, total)) => {
            let total_pages = total.div_ceil(page_size);
            let items: Vec<LinkView> = links.into_iter().map(|l| view(&state, l)).collect();
            info!(
                "Admin API: returning {} links (page {} of {}, total: {})",
                items.len(),
                page,
                total_pages,
                total
            );
            success_response(PaginatedLinks {
                items,
                pagination: PaginationInfo {
                    page,
                    page_size,
                    total,
                    total_pages,
                },
            })
        }
        Err(e) => error_from_leadlinker(&e),
    }
}

pub async fn post_link(
    owner: web::ReqData<OwnerId>,
    body: web::Json<CreateLinkRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = state.links.create_link(&owner.0, body.into_inner()).await;
    created_result(result.map(|link| view(&state, link)))
}

pub async fn get_link(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = state.links.get_link(&owner.0, &path).await;
    api_result(result.map(|link| view(&state, link)))
}

pub async fn update_link(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    body: web::Json<UpdateLinkRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = state
        .links
        .update_link(&owner.0, &path, body.into_inner())
        .await;
    api_result(result.map(|link| view(&state, link)))
}

pub async fn delete_link(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match state.links.delete_link(&owner.0, &path).await {
        Ok(()) => success_response(serde_json::json!({ "id": path.as_str() })),
        Err(e) => error_from_leadlinker(&e),
    }
}
