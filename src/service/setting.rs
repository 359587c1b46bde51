use sea_orm::DatabaseConnection;

use crate::{data::setting::SystemSettingRepository, error::Error};

pub struct SettingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingService<'a> {
    /// Creates a new instance of [`SettingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> Result<Option<entity::system_setting::Model>, Error> {
        SystemSettingRepository::new(self.db).get_by_key(key).await
    }

    /// Returns the setting's value, or `default` when the key isn't set
    pub async fn get_value_or(&self, key: &str, default: &str) -> Result<String, Error> {
        Ok(self
            .get(key)
            .await?
            .map(|setting| setting.value)
            .unwrap_or_else(|| default.to_string()))
    }

    /// Creates or replaces a setting
    ///
    /// # Arguments
    /// - `description`: replaces the stored description when provided
    /// - `is_public`: replaces the visibility when provided, new settings default to private
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<String>,
        description: Option<String>,
        is_public: Option<bool>,
    ) -> Result<entity::system_setting::Model, Error> {
        let setting = SystemSettingRepository::new(self.db)
            .upsert(key, value.into(), description, is_public)
            .await?;

        tracing::info!(key, "updated system setting");

        Ok(setting)
    }

    /// Settings visible to academies, ordered by key
    pub async fn list_public(&self) -> Result<Vec<entity::system_setting::Model>, Error> {
        SystemSettingRepository::new(self.db).list_public().await
    }
}
