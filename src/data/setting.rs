use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait};

use crate::{
    error::Error,
    query::{Delegates, FindArgs, SortOrder, SystemSettingKey},
};

pub struct SystemSettingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SystemSettingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_key(
        &self,
        key: &str,
    ) -> Result<Option<entity::system_setting::Model>, Error> {
        self.db
            .system_setting()
            .find_unique(SystemSettingKey::Key(key.to_string()))
            .await
    }

    /// Creates the setting or replaces its value in a single statement.
    ///
    /// `description` and `is_public` are only overwritten when provided.
    pub async fn upsert(
        &self,
        key: &str,
        value: String,
        description: Option<String>,
        is_public: Option<bool>,
    ) -> Result<entity::system_setting::Model, Error> {
        use entity::system_setting::Column;

        let now = Utc::now().naive_utc();

        let mut update_columns = vec![Column::Value, Column::UpdatedAt];
        if description.is_some() {
            update_columns.push(Column::Description);
        }
        if is_public.is_some() {
            update_columns.push(Column::IsPublic);
        }

        let setting = entity::system_setting::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value),
            description: ActiveValue::Set(description),
            is_public: ActiveValue::Set(is_public.unwrap_or(false)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let setting = entity::prelude::SystemSetting::insert(setting)
            .on_conflict(
                OnConflict::column(Column::Key)
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(setting)
    }

    pub async fn list_public(&self) -> Result<Vec<entity::system_setting::Model>, Error> {
        use entity::system_setting::Column;

        self.db
            .system_setting()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::IsPublic.eq(true)))
                    .order_by(Column::Key, SortOrder::Asc),
            )
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<entity::system_setting::Model, Error> {
        self.db
            .system_setting()
            .delete(SystemSettingKey::Key(key.to_string()))
            .await
    }
}
