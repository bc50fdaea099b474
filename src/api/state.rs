use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::StaticConfig;
use crate::services::{
    FormService, LinkService, LinkSettings, LinkStatsService, ResolutionService,
    SubmissionService,
};
use crate::storage::{StorageHealth, Stores};

/// Services shared by every worker, registered as `web::Data<AppState>`
pub struct AppState {
    pub resolution: ResolutionService,
    pub submission: SubmissionService,
    pub links: LinkService,
    pub forms: FormService,
    pub stats: LinkStatsService,
    pub health: Arc<dyn StorageHealth>,
    /// 根路径跳转地址
    pub default_url: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(stores: &Stores, config: &StaticConfig) -> Self {
        Self {
            resolution: ResolutionService::new(stores),
            submission: SubmissionService::new(stores),
            links: LinkService::new(stores, LinkSettings::from_config(config)),
            forms: FormService::new(stores),
            stats: LinkStatsService::new(stores),
            health: stores.health.clone(),
            default_url: config
                .links
                .default_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            started_at: Utc::now(),
        }
    }
}
