use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;
use uuid::Uuid;

use super::converters::model_to_submission;
use super::{SeaOrmStorage, retry, storage_error};
use crate::errors::Result;
use crate::storage::models::{NewSubmission, Submission};
use crate::storage::traits::SubmissionStore;
use migration::entities::submission;

#[async_trait]
impl SubmissionStore for SeaOrmStorage {
    async fn insert_submission(&self, new: NewSubmission) -> Result<Submission> {
        let stored = Submission {
            id: Uuid::new_v4().to_string(),
            link_id: new.link_id,
            form_id: new.form_id,
            data: new.data,
            ip_address: new.meta.ip_address,
            user_agent: new.meta.user_agent,
            referrer: new.meta.referrer,
            created_at: Utc::now(),
        };
        let active = submission::ActiveModel {
            id: Set(stored.id.clone()),
            link_id: Set(stored.link_id.clone()),
            form_id: Set(stored.form_id.clone()),
            data: Set(serde_json::to_string(&stored.data)?),
            ip_address: Set(stored.ip_address.clone()),
            user_agent: Set(stored.user_agent.clone()),
            referrer: Set(stored.referrer.clone()),
            created_at: Set(stored.created_at),
        };

        let db = &self.db;
        retry::with_retry("insert_submission", self.retry_config, || {
            let active = active.clone();
            async move {
                submission::Entity::insert(active)
                    .exec_without_returning(db)
                    .await
            }
        })
        .await
        .map_err(|e| storage_error(e, "Failed to store submission"))?;

        debug!("Submission {} stored for link {}", stored.id, stored.link_id);
        Ok(stored)
    }

    async fn recent_submissions(&self, link_id: &str, limit: u64) -> Result<Vec<Submission>> {
        let db = &self.db;
        let models = retry::with_retry("recent_submissions", self.retry_config, || async {
            submission::Entity::find()
                .filter(submission::Column::LinkId.eq(link_id))
                .order_by_desc(submission::Column::CreatedAt)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to load submissions"))?;

        models.into_iter().map(model_to_submission).collect()
    }

    async fn count_for_form(&self, form_id: &str) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_for_form", self.retry_config, || async {
            submission::Entity::find()
                .filter(submission::Column::FormId.eq(form_id))
                .count(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to count submissions"))
    }
}
