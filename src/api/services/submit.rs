use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::{Value, json};
use tracing::{debug, error, trace};

use super::{request_meta, wants_json};
use crate::api::AppState;
use crate::errors::{LeadlinkerError, Result};
use crate::storage::SubmissionData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    UrlEncoded,
}

fn body_format(req: &HttpRequest) -> Result<BodyFormat> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or_default().trim();

    match mime {
        "application/json" => Ok(BodyFormat::Json),
        "" | "application/x-www-form-urlencoded" => Ok(BodyFormat::UrlEncoded),
        other => Err(LeadlinkerError::validation(format!(
            "Unsupported content type: {}",
            other
        ))),
    }
}

/// JSON 对象转为扁平字符串表；标量转字符串，null 为空串，嵌套值拒绝
pub fn parse_json_body(body: &[u8]) -> Result<SubmissionData> {
    if body.is_empty() {
        return Ok(SubmissionData::new());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| LeadlinkerError::validation(format!("Invalid JSON body: {}", e)))?;
    let Value::Object(map) = value else {
        return Err(LeadlinkerError::validation(
            "Submission body must be a JSON object",
        ));
    };

    let mut data = SubmissionData::new();
    for (key, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(LeadlinkerError::validation(format!(
                    "Field '{}' must be a string, number or boolean",
                    key
                )));
            }
        };
        data.insert(key, text);
    }
    Ok(data)
}

/// urlencoded 表单；重复键取最后一个值
pub fn parse_form_body(body: &[u8]) -> SubmissionData {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "success": false, "error": message }))
}

fn failure_response(req: &HttpRequest, err: &LeadlinkerError) -> HttpResponse {
    match err {
        LeadlinkerError::MissingFields(labels) => HttpResponse::BadRequest()
            .insert_header(("Content-Type", "application/json; charset=utf-8"))
            .json(json!({
                "success": false,
                "error": err.message(),
                "missingFields": labels,
            })),
        _ => {
            let status = err.http_status();
            if status.is_server_error() {
                error!("Submission to {} failed: {}", req.path(), err);
                json_error(status, "Something went wrong. Please try again later.")
            } else {
                json_error(status, err.message())
            }
        }
    }
}

/// `POST /submit/{code}`
pub async fn submit_form(
    req: HttpRequest,
    path: web::Path<String>,
    body: std::result::Result<web::Bytes, actix_web::Error>,
    state: web::Data<AppState>,
) -> impl Responder {
    let code = path.into_inner();
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            let status = e.as_response_error().status_code();
            debug!("Rejected submission body for {}: {}", code, e);
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "Request body is too large"
            } else {
                "Invalid request body"
            };
            return json_error(status, message);
        }
    };
    trace!("Submission received for {} ({} bytes)", code, body.len());

    let format = match body_format(&req) {
        Ok(format) => format,
        Err(e) => return failure_response(&req, &e),
    };
    let data = match format {
        BodyFormat::Json => match parse_json_body(&body) {
            Ok(data) => data,
            Err(e) => return failure_response(&req, &e),
        },
        BodyFormat::UrlEncoded => parse_form_body(&body),
    };

    let meta = request_meta(&req);
    match state.submission.submit(&code, data, &meta).await {
        Ok(result) => {
            debug!(
                "Submission {} accepted, redirecting to {}",
                result.submission_id, result.destination
            );
            if format == BodyFormat::Json || wants_json(&req) {
                HttpResponse::Ok()
                    .insert_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(json!({ "success": true, "redirectUrl": result.destination }))
            } else {
                HttpResponse::SeeOther()
                    .insert_header(("Location", result.destination))
                    .finish()
            }
        }
        Err(e) => failure_response(&req, &e),
    }
}
