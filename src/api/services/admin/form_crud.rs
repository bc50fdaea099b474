//! Admin API 表单 CRUD 操作

use actix_web::{HttpResponse, Responder, web};

use crate::api::AppState;
use crate::api::middleware::OwnerId;
use crate::services::{CreateFormRequest, UpdateFormRequest};

use super::helpers::{api_result, created_result, error_from_leadlinker, success_response};

pub async fn list_forms(
    owner: web::ReqData<OwnerId>,
    state: web::Data<AppState>,
) -> impl Responder {
    api_result(state.forms.list_forms(&owner.0).await)
}

pub async fn post_form(
    owner: web::ReqData<OwnerId>,
    body: web::Json<CreateFormRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    created_result(state.forms.create_form(&owner.0, body.into_inner()).await)
}

/// 内置模板（contact / newsletter / demo）
pub async fn get_templates(state: web::Data<AppState>) -> impl Responder {
    success_response(state.forms.templates())
}

pub async fn get_form(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    api_result(state.forms.get_form(&owner.0, &path).await)
}

pub async fn update_form(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    body: web::Json<UpdateFormRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    api_result(
        state
            .forms
            .update_form(&owner.0, &path, body.into_inner())
            .await,
    )
}

pub async fn delete_form(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match state.forms.delete_form(&owner.0, &path).await {
        Ok(()) => success_response(serde_json::json!({ "id": path.as_str() })),
        Err(e) => error_from_leadlinker(&e),
    }
}
