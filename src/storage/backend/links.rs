use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use super::converters::{link_to_active_model, model_to_link};
use super::{SeaOrmStorage, retry, storage_error};
use crate::errors::{LeadlinkerError, Result};
use crate::storage::models::{Link, LinkFilter};
use crate::storage::traits::LinkStore;
use migration::entities::{link, submission};

impl SeaOrmStorage {
    async fn bump_counter(&self, id: &str, column: link::Column, label: &str) -> Result<()> {
        let db = &self.db;
        retry::with_retry(label, self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(column, Expr::col(column).add(1))
                .filter(link::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, label))?;
        Ok(())
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let model = retry::with_retry("find_active_by_code", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .filter(link::Column::IsActive.eq(true))
                .one(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to look up link"))?;

        Ok(model.map(model_to_link))
    }

    async fn get_link(&self, id: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let model = retry::with_retry("get_link", self.retry_config, || async {
            link::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to load link"))?;

        Ok(model.map(model_to_link))
    }

    async fn insert_link(&self, link: &Link) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_link", self.retry_config, || {
            let active = link_to_active_model(link, true);
            async move { link::Entity::insert(active).exec_without_returning(db).await }
        })
        .await
        .map_err(|e| storage_error(e, &format!("Failed to insert link '{}'", link.code)))?;

        info!("Link created: {} -> {}", link.code, link.destination);
        Ok(())
    }

    async fn update_link(&self, link: &Link) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_link", self.retry_config, || {
            let active = link_to_active_model(link, false);
            async move {
                link::Entity::update_many()
                    .set(active)
                    .filter(link::Column::Id.eq(link.id.as_str()))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| storage_error(e, &format!("Failed to update link '{}'", link.code)))?;

        if result.rows_affected == 0 {
            return Err(LeadlinkerError::not_found(format!(
                "Link not found: {}",
                link.id
            )));
        }
        debug!("Link updated: {}", link.id);
        Ok(())
    }

    async fn delete_link(&self, id: &str) -> Result<bool> {
        let db = &self.db;
        let deleted = retry::with_retry("delete_link", self.retry_config, || async {
            let txn = db.begin().await?;
            submission::Entity::delete_many()
                .filter(submission::Column::LinkId.eq(id))
                .exec(&txn)
                .await?;
            let result = link::Entity::delete_by_id(id).exec(&txn).await?;
            txn.commit().await?;
            Ok::<_, DbErr>(result.rows_affected)
        })
        .await
        .map_err(|e| storage_error(e, "Failed to delete link"))?;

        if deleted > 0 {
            info!("Link deleted: {}", id);
        }
        Ok(deleted > 0)
    }

    async fn list_links(
        &self,
        owner_id: &str,
        filter: &LinkFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Link>, u64)> {
        let now = Utc::now();
        let mut condition = Condition::all().add(link::Column::OwnerId.eq(owner_id));

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(link::Column::Code.contains(search))
                    .add(link::Column::Destination.contains(search))
                    .add(link::Column::Title.contains(search)),
            );
        }
        if filter.only_expired {
            condition = condition
                .add(link::Column::ExpiresAt.is_not_null())
                .add(link::Column::ExpiresAt.lte(now));
        }
        if filter.only_active {
            condition = condition.add(link::Column::IsActive.eq(true)).add(
                Condition::any()
                    .add(link::Column::ExpiresAt.is_null())
                    .add(link::Column::ExpiresAt.gt(now)),
            );
        }

        let db = &self.db;
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let (models, total) = retry::with_retry("list_links", self.retry_config, || {
            let condition = condition.clone();
            async move {
                let query = link::Entity::find().filter(condition);
                let total = query.clone().count(db).await?;
                let models = query
                    .order_by_desc(link::Column::CreatedAt)
                    .order_by_desc(link::Column::Id)
                    .offset(offset)
                    .limit(page_size)
                    .all(db)
                    .await?;
                Ok::<_, DbErr>((models, total))
            }
        })
        .await
        .map_err(|e| storage_error(e, "Failed to list links"))?;

        Ok((models.into_iter().map(model_to_link).collect(), total))
    }

    async fn increment_clicks(&self, id: &str) -> Result<()> {
        self.bump_counter(id, link::Column::ClickCount, "increment_clicks")
            .await
    }

    async fn increment_leads(&self, id: &str) -> Result<()> {
        self.bump_counter(id, link::Column::LeadCount, "increment_leads")
            .await
    }
}
