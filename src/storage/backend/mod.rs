//! SeaORM storage backend
//!
//! One `SeaOrmStorage` implements every store trait over SQLite,
//! MySQL/MariaDB or PostgreSQL.

mod connection;
pub mod converters;
mod events;
mod forms;
mod links;
pub mod retry;
mod submissions;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{LeadlinkerError, Result};
use crate::storage::traits::StorageHealth;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use retry::RetryConfig;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<&'static str> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite")
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql")
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres")
    } else {
        Err(LeadlinkerError::database_config(format!(
            "Cannot infer database type from URL '{}'. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 把 DbErr 翻译为业务错误：唯一约束冲突 → Conflict，连接问题 → DatabaseConnection
pub(crate) fn storage_error(err: DbErr, context: &str) -> LeadlinkerError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return LeadlinkerError::conflict(format!("{}: {}", context, detail));
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            LeadlinkerError::database_connection(format!("{}: {}", context, err))
        }
        other => LeadlinkerError::database_operation(format!("{}: {}", context, other)),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: &'static str,
    retry_config: RetryConfig,
}

impl SeaOrmStorage {
    /// 连接数据库并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(LeadlinkerError::database_config("database_url is not set"));
        }

        let backend_name = infer_backend_from_url(database_url)?;
        let db = if backend_name == "sqlite" {
            let url = if database_url.starts_with("sqlite:") {
                database_url.to_string()
            } else {
                format!("sqlite://{}", database_url)
            };
            connect_sqlite(&url).await?
        } else {
            connect_generic(config, backend_name).await?
        };

        run_migrations(&db).await?;

        info!("{} storage initialized", backend_name.to_uppercase());
        Ok(Self {
            db,
            backend_name,
            retry_config: RetryConfig::from(config),
        })
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl StorageHealth for SeaOrmStorage {
    async fn health_check(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| storage_error(e, "Health check failed"))
    }

    fn backend_name(&self) -> &str {
        self.backend_name
    }
}
