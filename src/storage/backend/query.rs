//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::model_to_short_url;
use crate::errors::Result;
use crate::storage::ShortUrl;

use migration::entities::short_url;

impl SeaOrmStorage {
    /// Whether `key` exists at all, active or not.
    ///
    /// Backs the generator's existence predicate: deactivated keys are
    /// never handed out again, so this deliberately ignores `is_active`.
    pub async fn key_exists(&self, key: &str) -> Result<bool> {
        let count = short_url::Entity::find()
            .filter(short_url::Column::Key.eq(key))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Look up an active link by key (redirect path).
    pub async fn find_active_by_key(&self, key: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find()
            .filter(short_url::Column::Key.eq(key))
            .filter(short_url::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_short_url))
    }

    /// Look up a link by key regardless of status (peek path).
    pub async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find()
            .filter(short_url::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_short_url))
    }

    /// Look up an active link by its secret key (admin path).
    pub async fn find_active_by_secret_key(&self, secret_key: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find()
            .filter(short_url::Column::SecretKey.eq(secret_key))
            .filter(short_url::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_short_url))
    }

    /// Total number of registered links (health check).
    pub async fn count(&self) -> Result<u64> {
        Ok(short_url::Entity::find().count(&self.db).await?)
    }
}
