pub mod admin;
pub mod health;
pub mod pages;
pub mod redirect;
pub mod submit;

use actix_web::HttpRequest;
use actix_web::http::header::{ACCEPT, REFERER, USER_AGENT};
use actix_web::web;

pub use health::health_routes;

use crate::storage::RequestMeta;
use crate::utils::ip::extract_client_ip;

/// 公共路由：`/`、`/{code}`、`/submit/{code}`
pub fn public_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(redirect::root_redirect))
        .route("/", web::head().to(redirect::root_redirect))
        .route("/submit/{code}", web::post().to(submit::submit_form))
        .route("/{code}", web::get().to(redirect::resolve_code))
        .route("/{code}", web::head().to(redirect::resolve_code))
}

fn header_str(req: &HttpRequest, name: actix_web::http::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// 请求方元数据（IP、UA、来源页）
pub fn request_meta(req: &HttpRequest) -> RequestMeta {
    RequestMeta {
        ip_address: extract_client_ip(req),
        user_agent: header_str(req, USER_AGENT),
        referrer: header_str(req, REFERER),
    }
}

/// Accept 要求 JSON 且不接受 HTML 时返回 JSON
pub fn wants_json(req: &HttpRequest) -> bool {
    let accept = req
        .headers()
        .get(ACCEPT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    accept.contains("application/json") && !accept.contains("text/html")
}
