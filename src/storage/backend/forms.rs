use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use tracing::{info, warn};

use super::converters::{form_to_active_model, model_to_form};
use super::{SeaOrmStorage, retry, storage_error};
use crate::errors::{LeadlinkerError, Result};
use crate::storage::models::Form;
use crate::storage::traits::FormStore;
use migration::entities::{form, link};

#[async_trait]
impl FormStore for SeaOrmStorage {
    async fn get_form(&self, id: &str) -> Result<Option<Form>> {
        let db = &self.db;
        let model = retry::with_retry("get_form", self.retry_config, || async {
            form::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to load form"))?;

        model.map(model_to_form).transpose()
    }

    async fn insert_form(&self, form: &Form) -> Result<()> {
        let active = form_to_active_model(form, true)?;
        let db = &self.db;
        retry::with_retry("insert_form", self.retry_config, || {
            let active = active.clone();
            async move { form::Entity::insert(active).exec_without_returning(db).await }
        })
        .await
        .map_err(|e| storage_error(e, "Failed to insert form"))?;

        info!("Form created: {} ({})", form.name, form.id);
        Ok(())
    }

    async fn update_form(&self, form: &Form) -> Result<()> {
        let active = form_to_active_model(form, false)?;
        let db = &self.db;
        let result = retry::with_retry("update_form", self.retry_config, || {
            let active = active.clone();
            async move {
                form::Entity::update_many()
                    .set(active)
                    .filter(form::Column::Id.eq(form.id.as_str()))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| storage_error(e, "Failed to update form"))?;

        if result.rows_affected == 0 {
            return Err(LeadlinkerError::not_found(format!(
                "Form not found: {}",
                form.id
            )));
        }
        Ok(())
    }

    async fn delete_form(&self, id: &str) -> Result<bool> {
        let db = &self.db;
        let (detached, deleted) = retry::with_retry("delete_form", self.retry_config, || async {
            let txn = db.begin().await?;
            let detached = link::Entity::update_many()
                .set(link::ActiveModel {
                    form_id: Set(None),
                    ..Default::default()
                })
                .filter(link::Column::FormId.eq(id))
                .exec(&txn)
                .await?;
            let deleted = form::Entity::delete_by_id(id).exec(&txn).await?;
            txn.commit().await?;
            Ok::<_, DbErr>((detached.rows_affected, deleted.rows_affected))
        })
        .await
        .map_err(|e| storage_error(e, "Failed to delete form"))?;

        if detached > 0 {
            warn!("Form {} deleted, detached from {} link(s)", id, detached);
        }
        Ok(deleted > 0)
    }

    async fn list_forms(&self, owner_id: &str) -> Result<Vec<Form>> {
        let db = &self.db;
        let models = retry::with_retry("list_forms", self.retry_config, || async {
            form::Entity::find()
                .filter(form::Column::OwnerId.eq(owner_id))
                .order_by_desc(form::Column::CreatedAt)
                .all(db)
                .await
        })
        .await
        .map_err(|e| storage_error(e, "Failed to list forms"))?;

        models.into_iter().map(model_to_form).collect()
    }
}
