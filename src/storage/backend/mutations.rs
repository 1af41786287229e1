//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_short_url, new_record_active_model};
use crate::errors::{Result, ShorturlError};
use crate::storage::ShortUrl;

use migration::entities::short_url;

impl SeaOrmStorage {
    /// Insert a new link record.
    ///
    /// A unique-index rejection of the key or secret key maps to
    /// [`ShorturlError::KeyConflict`] so the caller can distinguish a
    /// lost insert race from other database failures.
    pub async fn insert(&self, record: &ShortUrl) -> Result<()> {
        short_url::Entity::insert(new_record_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    ShorturlError::key_conflict(format!("key already taken: {}", record.key))
                } else {
                    ShorturlError::database_operation(format!("failed to insert link: {}", e))
                }
            })?;

        info!("Short link created: {} -> {}", record.key, record.target_url);
        Ok(())
    }

    /// Atomically bump the click count for `key` inside the database.
    ///
    /// Counts only go up, and only through this call; reads never touch
    /// the counter.
    pub async fn increment_clicks(&self, key: &str) -> Result<()> {
        short_url::Entity::update_many()
            .col_expr(
                short_url::Column::ClickCount,
                Expr::col(short_url::Column::ClickCount).add(1),
            )
            .filter(short_url::Column::Key.eq(key))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShorturlError::database_operation(format!("failed to count click: {}", e))
            })?;

        Ok(())
    }

    /// One-way deactivation by secret key.
    ///
    /// Returns the deactivated record, or `None` if the secret is unknown
    /// or the link is already inactive. The row itself is kept forever so
    /// its key stays reserved.
    pub async fn deactivate_by_secret_key(&self, secret_key: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find()
            .filter(short_url::Column::SecretKey.eq(secret_key))
            .filter(short_url::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        let Some(model) = model else {
            return Ok(None);
        };

        let mut active: short_url::ActiveModel = model.into();
        active.is_active = Set(false);
        let updated = active.update(&self.db).await.map_err(|e| {
            ShorturlError::database_operation(format!("failed to deactivate link: {}", e))
        })?;

        info!("Short link deactivated: {}", updated.key);
        Ok(Some(model_to_short_url(updated)))
    }
}
