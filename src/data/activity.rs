use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait};

use crate::{
    error::Error,
    model::activity::NewActivity,
    query::{Delegates, FindArgs, SortOrder},
};

/// Append-only access to the audit log.
pub struct ActivityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ActivityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn append(&self, activity: NewActivity) -> Result<entity::activity::Model, Error> {
        self.db
            .activity()
            .create(entity::activity::ActiveModel {
                academy_id: ActiveValue::Set(activity.academy_id),
                admin_id: ActiveValue::Set(activity.admin_id),
                action: ActiveValue::Set(activity.action),
                description: ActiveValue::Set(activity.description),
                metadata: ActiveValue::Set(activity.metadata),
                ip_address: ActiveValue::Set(activity.ip_address),
                user_agent: ActiveValue::Set(activity.user_agent),
                ..Default::default()
            })
            .await
    }

    /// Latest `take` entries of the academy, newest first
    pub async fn recent_for_academy(
        &self,
        academy_id: i32,
        take: i64,
    ) -> Result<Vec<entity::activity::Model>, Error> {
        use entity::activity::Column;

        self.db
            .activity()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::AcademyId.eq(academy_id)))
                    .order_by(Column::CreatedAt, SortOrder::Desc)
                    .order_by(Column::Id, SortOrder::Desc)
                    .take(take),
            )
            .await
    }

    pub async fn list_by_action(
        &self,
        action: &str,
    ) -> Result<Vec<entity::activity::Model>, Error> {
        use entity::activity::Column;

        self.db
            .activity()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::Action.eq(action)))
                    .order_by(Column::Id, SortOrder::Asc),
            )
            .await
    }
}
