use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, error, trace};

use super::pages::{render_error_page, render_form_page};
use super::{request_meta, wants_json};
use crate::api::AppState;
use crate::errors::LeadlinkerError;
use crate::services::Resolution;

/// `GET /`：跳转到默认地址，未配置时 404
pub async fn root_redirect(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    match state.default_url.as_deref() {
        Some(url) => HttpResponse::Found()
            .insert_header(("Location", url))
            .insert_header(("Cache-Control", "no-cache"))
            .finish(),
        None => {
            error_page(&req, &LeadlinkerError::not_found("No default destination configured"))
        }
    }
}

/// `GET /{code}`：直接跳转或展示表单
pub async fn resolve_code(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let code = path.into_inner();
    let meta = request_meta(&req);
    trace!("Resolving short code: {}", code);

    match state.resolution.resolve(&code, &meta).await {
        Ok(Resolution::DirectRedirect { destination }) => {
            debug!("Redirecting {} -> {}", code, destination);
            HttpResponse::Found()
                .insert_header(("Location", destination))
                .insert_header(("Cache-Control", "no-cache"))
                .finish()
        }
        Ok(Resolution::FormPresentation { link, form }) => {
            debug!("Presenting form {} for {}", form.id, code);
            let action = format!("/submit/{}", link.code);
            HttpResponse::Ok()
                .insert_header(("Content-Type", "text/html; charset=utf-8"))
                .insert_header(("Cache-Control", "no-store"))
                .body(render_form_page(&link, &form, &action))
        }
        Err(e) => error_page(&req, &e),
    }
}

/// 错误响应：按 Accept 返回 HTML 或 JSON
///
/// 5xx 只返回通用信息，细节写入日志。
pub(crate) fn error_page(req: &HttpRequest, err: &LeadlinkerError) -> HttpResponse {
    let status = err.http_status();
    let message = if status.is_server_error() {
        error!("Public endpoint {} failed: {}", req.path(), err);
        "Something went wrong. Please try again later.".to_string()
    } else {
        err.message().to_string()
    };

    if wants_json(req) {
        return HttpResponse::build(status)
            .insert_header(("Content-Type", "application/json; charset=utf-8"))
            .json(json!({ "success": false, "error": message }));
    }

    let title = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::GONE => "Link Expired",
        StatusCode::BAD_REQUEST => "Bad Request",
        _ => "Internal Server Error",
    };
    HttpResponse::build(status)
        .insert_header(("Content-Type", "text/html; charset=utf-8"))
        .body(render_error_page(status.as_u16(), title, &message))
}
