use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::api::jwt::IdentityVerifier;
use crate::config::StaticConfig;
use crate::storage::{SeaOrmStorage, StorageFactory, Stores};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub state: AppState,
    pub verifier: Option<Arc<IdentityVerifier>>,
}

/// 准备服务器启动的上下文
/// 包括存储、服务和身份校验
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    let stores = Stores::from_backend(storage.clone());
    info!("Using storage backend: {}", stores.health.backend_name());

    let verifier = IdentityVerifier::from_config(&config.auth).map(Arc::new);
    if verifier.is_some() {
        info!(
            "Management API available at: {}/v1",
            config.routes.api_prefix
        );
    } else {
        warn!("Management API is disabled (auth.jwt_secret not set)");
    }

    if config.links.default_url.is_none() {
        debug!("No default URL configured, `/` will answer 404");
    }

    let state = AppState::new(&stores, config);

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        state,
        verifier,
    })
}
