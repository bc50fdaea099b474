//! Admin API 路由配置

use actix_web::web;

use super::form_crud::{delete_form, get_form, get_templates, list_forms, post_form, update_form};
use super::link_crud::{delete_link, get_all_links, get_link, post_link, update_link};
use super::stats::get_link_stats;

/// 链接管理路由 `/links`
///
/// 包含：
/// - GET/HEAD /links - 分页列出链接
/// - POST /links - 创建链接
/// - GET /links/{id}/stats - 单链接统计
/// - GET/PUT/DELETE /links/{id}
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(get_all_links))
        .route("", web::head().to(get_all_links))
        .route("", web::post().to(post_link))
        .route("/{id}/stats", web::get().to(get_link_stats))
        .route("/{id}", web::get().to(get_link))
        .route("/{id}", web::put().to(update_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// 表单管理路由 `/forms`
pub fn forms_routes() -> actix_web::Scope {
    web::scope("/forms")
        .route("", web::get().to(list_forms))
        .route("", web::post().to(post_form))
        // must be before /{id}
        .route("/templates", web::get().to(get_templates))
        .route("/{id}", web::get().to(get_form))
        .route("/{id}", web::put().to(update_form))
        .route("/{id}", web::delete().to(delete_form))
}

/// Admin API v1 路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(links_routes())
        .service(forms_routes())
}
