use sea_orm::DatabaseConnection;

use crate::{data::activity::ActivityRepository, error::Error, model::activity::NewActivity};

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActivityService<'a> {
    /// Creates a new instance of [`ActivityService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, activity: NewActivity) -> Result<entity::activity::Model, Error> {
        let entry = ActivityRepository::new(self.db).append(activity).await?;

        tracing::debug!(action = %entry.action, activity_id = entry.id, "recorded activity");

        Ok(entry)
    }

    /// Returns the academy's latest `take` activity entries, newest first
    pub async fn recent_for_academy(
        &self,
        academy_id: i32,
        take: u64,
    ) -> Result<Vec<entity::activity::Model>, Error> {
        let take = i64::try_from(take).unwrap_or(i64::MAX);

        ActivityRepository::new(self.db)
            .recent_for_academy(academy_id, take)
            .await
    }
}
