use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::SubscriptionStatus;
use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait};

use crate::{
    error::Error,
    query::{Delegates, FindArgs, SortOrder, SubscriptionPlanKey},
};

pub struct SubscriptionPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionPlanRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        plan: entity::subscription_plan::ActiveModel,
    ) -> Result<entity::subscription_plan::Model, Error> {
        self.db.subscription_plan().create(plan).await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::subscription_plan::Model>, Error> {
        self.db.subscription_plan().find_unique(id).await
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::subscription_plan::Model>, Error> {
        self.db
            .subscription_plan()
            .find_unique(SubscriptionPlanKey::Name(name.to_string()))
            .await
    }

    /// Plans open for new subscriptions, cheapest first
    pub async fn list_active(&self) -> Result<Vec<entity::subscription_plan::Model>, Error> {
        use entity::subscription_plan::Column;

        self.db
            .subscription_plan()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::IsActive.eq(true)))
                    .order_by(Column::Price, SortOrder::Asc),
            )
            .await
    }
}

pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        academy_id: i32,
        plan_id: i32,
        status: SubscriptionStatus,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        auto_renew: bool,
    ) -> Result<entity::subscription::Model, Error> {
        self.db
            .subscription()
            .create(entity::subscription::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                plan_id: ActiveValue::Set(plan_id),
                status: ActiveValue::Set(status),
                start_date: ActiveValue::Set(start_date),
                end_date: ActiveValue::Set(end_date),
                auto_renew: ActiveValue::Set(auto_renew),
                ..Default::default()
            })
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::subscription::Model>, Error> {
        self.db.subscription().find_unique(id).await
    }

    /// Finds the subscription currently granting the academy its plan limits.
    ///
    /// A subscription is current when it is ACTIVE and `now` falls within its period.
    /// When several qualify, the one ending last wins.
    pub async fn find_active(
        &self,
        academy_id: i32,
        now: NaiveDateTime,
    ) -> Result<Option<entity::subscription::Model>, Error> {
        use entity::subscription::Column;

        self.db
            .subscription()
            .find_first(
                FindArgs::new()
                    .filter(
                        Condition::all()
                            .add(Column::AcademyId.eq(academy_id))
                            .add(Column::Status.eq(SubscriptionStatus::Active))
                            .add(Column::StartDate.lte(now))
                            .add(Column::EndDate.gt(now)),
                    )
                    .order_by(Column::EndDate, SortOrder::Desc),
            )
            .await
    }

    /// Like [`Self::find_active`], also returning the subscription's plan.
    pub async fn find_active_with_plan(
        &self,
        academy_id: i32,
        now: NaiveDateTime,
    ) -> Result<
        Option<(
            entity::subscription::Model,
            entity::subscription_plan::Model,
        )>,
        Error,
    > {
        let Some(subscription) = self.find_active(academy_id, now).await? else {
            return Ok(None);
        };

        let plan = self
            .db
            .subscription_plan()
            .find_unique_or_throw(subscription.plan_id)
            .await?;

        Ok(Some((subscription, plan)))
    }

    pub async fn list_for_academy(
        &self,
        academy_id: i32,
    ) -> Result<Vec<entity::subscription::Model>, Error> {
        use entity::subscription::Column;

        self.db
            .subscription()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::AcademyId.eq(academy_id)))
                    .order_by(Column::StartDate, SortOrder::Desc),
            )
            .await
    }

    /// Starts a subscription period, marking the subscription ACTIVE
    pub async fn activate(
        &self,
        id: i32,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<entity::subscription::Model, Error> {
        self.db
            .subscription()
            .update(
                id,
                entity::subscription::ActiveModel {
                    status: ActiveValue::Set(SubscriptionStatus::Active),
                    start_date: ActiveValue::Set(start_date),
                    end_date: ActiveValue::Set(end_date),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: SubscriptionStatus,
    ) -> Result<entity::subscription::Model, Error> {
        self.db
            .subscription()
            .update(
                id,
                entity::subscription::ActiveModel {
                    status: ActiveValue::Set(status),
                    ..Default::default()
                },
            )
            .await
    }

    /// Cancels every ACTIVE subscription of the academy except `keep_id`
    pub async fn cancel_other_active(&self, academy_id: i32, keep_id: i32) -> Result<u64, Error> {
        use entity::subscription::Column;

        self.db
            .subscription()
            .update_many(
                Condition::all()
                    .add(Column::AcademyId.eq(academy_id))
                    .add(Column::Status.eq(SubscriptionStatus::Active))
                    .add(Column::Id.ne(keep_id)),
                entity::subscription::ActiveModel {
                    status: ActiveValue::Set(SubscriptionStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
    }

    /// Marks ACTIVE subscriptions whose period ended at or before `now` as EXPIRED.
    ///
    /// # Returns
    /// The expired subscriptions
    pub async fn expire_due(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::subscription::Model>, Error> {
        use entity::subscription::Column;

        self.db
            .subscription()
            .update_many_and_return(
                Condition::all()
                    .add(Column::Status.eq(SubscriptionStatus::Active))
                    .add(Column::EndDate.lte(now)),
                entity::subscription::ActiveModel {
                    status: ActiveValue::Set(SubscriptionStatus::Expired),
                    ..Default::default()
                },
            )
            .await
    }
}
