use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::ShortUrl;
use migration::entities::short_url;

/// 将 Sea-ORM Model 转换为 ShortUrl
pub fn model_to_short_url(model: short_url::Model) -> ShortUrl {
    ShortUrl {
        key: model.key,
        secret_key: model.secret_key,
        target_url: model.target_url,
        is_active: model.is_active,
        clicks: model.click_count.max(0) as u64,
        created_at: model.created_at,
    }
}

/// 将 ShortUrl 转换为 ActiveModel（用于插入新记录）
pub fn new_record_active_model(record: &ShortUrl) -> short_url::ActiveModel {
    short_url::ActiveModel {
        id: NotSet,
        key: Set(record.key.clone()),
        secret_key: Set(record.secret_key.clone()),
        target_url: Set(record.target_url.clone()),
        is_active: Set(record.is_active),
        click_count: Set(record.clicks as i64),
        created_at: Set(record.created_at),
    }
}
