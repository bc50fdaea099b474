use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::trace;
use uuid::Uuid;

use super::converters::model_to_event;
use super::{SeaOrmStorage, retry, storage_error};
use crate::errors::Result;
use crate::storage::models::{EventKind, LinkEvent, RequestMeta};
use crate::storage::traits::EventStore;
use migration::entities::link_event;

#[derive(Debug, FromQueryResult)]
struct KindCountRow {
    kind: String,
    count: i64,
}

#[async_trait]
impl EventStore for SeaOrmStorage {
    async fn record_event(
        &self,
        link_id: &str,
        kind: EventKind,
        meta: &RequestMeta,
        payload: Option<serde_json::Value>,
    ) -> Result<()> {
        let active = link_event::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            link_id: Set(link_id.to_string()),
            kind: Set(kind.to_string()),
            ip_address: Set(meta.ip_address.clone()),
            user_agent: Set(meta.user_agent.clone()),
            referrer: Set(meta.referrer.clone()),
            payload: Set(payload.as_ref().map(serde_json::Value::to_string)),
            created_at: Set(Utc::now()),
        };

        let db = &self.db;
        retry::with_retry("record_event", self.retry_config, || {
            let active = active.clone();
            async move {
                link_event::Entity::insert(active)
                    .exec_without_returning(db)
                    .await
            }
        })
        .await
        .map_err(|e| storage_error(e, "Failed to record event"))?;

        trace!("Recorded {} event for link {}", kind, link_id);
        Ok(())
    }

    async fn recent_events(&self, link_id: &str, limit: u64) -> Result<Vec<LinkEvent>> {
        let db = &self.db;
        let models = retry::with_retry("recent_events", self.retry_config, || async {
            link_event::Entity::find()
                .filter(link_event::Column::LinkId.eq(link_id))
                .order_by_desc(link_event::Column::CreatedAt)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to load events"))?;

        Ok(models.into_iter().filter_map(model_to_event).collect())
    }

    async fn count_by_kind(&self, link_id: &str) -> Result<BTreeMap<EventKind, u64>> {
        let db = &self.db;
        let rows = retry::with_retry("count_by_kind", self.retry_config, || async {
            link_event::Entity::find()
                .select_only()
                .column(link_event::Column::Kind)
                .column_as(link_event::Column::Id.count(), "count")
                .filter(link_event::Column::LinkId.eq(link_id))
                .group_by(link_event::Column::Kind)
                .into_model::<KindCountRow>()
                .all(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to count events"))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                EventKind::from_str(&row.kind)
                    .ok()
                    .map(|kind| (kind, row.count.max(0) as u64))
            })
            .collect())
    }
}
