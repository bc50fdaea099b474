pub mod jwt;
pub mod middleware;
pub mod services;
mod state;

use std::sync::Arc;

use actix_web::web;

use crate::config::RoutesConfig;
use jwt::IdentityVerifier;
use middleware::OwnerAuth;
use services::admin::routes::admin_v1_routes;
use services::{health_routes, public_routes};

pub use state::AppState;

/// Submission bodies are small flat maps
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Register every route of the service
///
/// Order matters: the management and health scopes come before the
/// catch-all `/{code}` route.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    state: web::Data<AppState>,
    verifier: Option<Arc<IdentityVerifier>>,
    routes: &RoutesConfig,
) {
    cfg.app_data(state)
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(
            web::scope(&routes.api_prefix)
                .wrap(OwnerAuth::new(verifier))
                .service(admin_v1_routes()),
        )
        .service(web::scope(&routes.health_prefix).service(health_routes()))
        .service(public_routes());
}
