use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use models::{
    EventKind, Field, FieldKind, Form, Link, LinkEvent, LinkFilter, NewSubmission, RequestMeta,
    SelectOption, Submission, SubmissionData, TemplateType,
};
pub use traits::{EventStore, FormStore, LinkStore, StorageHealth, SubmissionStore};

/// 服务层使用的一组存储句柄
///
/// 生产环境四个句柄指向同一个 `SeaOrmStorage`，测试中可以单独替换。
#[derive(Clone)]
pub struct Stores {
    pub links: Arc<dyn LinkStore>,
    pub forms: Arc<dyn FormStore>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub events: Arc<dyn EventStore>,
    pub health: Arc<dyn StorageHealth>,
}

impl Stores {
    pub fn from_backend(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            links: storage.clone(),
            forms: storage.clone(),
            submissions: storage.clone(),
            events: storage.clone(),
            health: storage,
        }
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::connect(config).await?;
        Ok(Arc::new(storage))
    }
}
