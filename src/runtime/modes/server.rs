//! Server mode
//!
//! Builds the actix application from the startup context and serves it
//! until the listener fails or a shutdown signal arrives.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::api::{self, middleware::RequestIdMiddleware};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: configuration and logging must be initialized first
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.server.trusted_proxies.is_empty() {
        warn!(
            "Client IP: auto-detect mode enabled. \
             Connections from private IPs will use X-Forwarded-For."
        );
    } else {
        warn!(
            "Client IP: explicit trusted proxies configured: {:?}",
            config.server.trusted_proxies
        );
    }

    let db_for_shutdown = startup.storage.get_db().clone();
    let state = web::Data::new(startup.state);
    let verifier = startup.verifier;
    let routes = config.routes.clone();

    let server = HttpServer::new(move || {
        let state = state.clone();
        let verifier = verifier.clone();
        let routes = routes.clone();

        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .configure(move |cfg| api::configure(cfg, state, verifier, &routes))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
