use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info, trace};

use crate::api::jwt::IdentityVerifier;
use crate::api::services::admin::{ApiResponse, ErrorCode};

/// 已认证的资源所有者，由中间件写入 request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerId(pub String);

/// Bearer token authentication for the management API
///
/// Without a verifier (no secret configured) every request is answered 404.
#[derive(Clone)]
pub struct OwnerAuth {
    verifier: Option<Arc<IdentityVerifier>>,
}

impl OwnerAuth {
    pub fn new(verifier: Option<Arc<IdentityVerifier>>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OwnerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OwnerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnerAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct OwnerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Option<Arc<IdentityVerifier>>,
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn disabled<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    debug!("Management API disabled (no jwt_secret) - returning 404");
    req.into_response(
        HttpResponse::NotFound()
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("Not Found")
            .map_into_right_body(),
    )
}

fn unauthenticated<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    info!("Management API authentication failed: {}", message);
    req.into_response(
        HttpResponse::Unauthorized()
            .json(ApiResponse::<()> {
                code: ErrorCode::Unauthorized as i32,
                message: message.to_string(),
                data: None,
            })
            .map_into_right_body(),
    )
}

impl<S, B> Service<ServiceRequest> for OwnerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(verifier) = self.verifier.as_ref() else {
            return Box::pin(async move { Ok(disabled(req)) });
        };

        let owner = match bearer_token(&req) {
            Some(token) => verifier.verify(&token),
            None => {
                return Box::pin(async move {
                    Ok(unauthenticated(req, "Missing bearer token"))
                });
            }
        };

        match owner {
            Ok(claims) => {
                trace!("Authenticated owner {}", claims.sub);
                req.extensions_mut().insert(OwnerId(claims.sub));
                let srv = self.service.clone();
                Box::pin(async move {
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                let message = e.message().to_string();
                Box::pin(async move { Ok(unauthenticated(req, &message)) })
            }
        }
    }
}
