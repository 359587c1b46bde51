use chrono::{Duration, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{PaymentStatus, SubscriptionStatus};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{PaymentModel, SubscriptionModel, SubscriptionPlanModel},
    TestSetup,
};

/// Price of every mock plan: 49.99
pub fn mock_plan_price() -> Decimal {
    Decimal::new(4999, 2)
}

impl TestSetup {
    pub fn billing<'a>(&'a self) -> BillingFixtures<'a> {
        BillingFixtures { setup: self }
    }
}

pub struct BillingFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> BillingFixtures<'a> {
    /// Insert an active 30 day plan named `Plan {n}` priced at [`mock_plan_price`].
    pub async fn insert_mock_plan(
        &self,
        n: i32,
        max_players: i32,
        max_storage: i64,
    ) -> Result<SubscriptionPlanModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::SubscriptionPlan::insert(entity::subscription_plan::ActiveModel {
                name: ActiveValue::Set(format!("Plan {}", n)),
                description: ActiveValue::Set(None),
                price: ActiveValue::Set(mock_plan_price()),
                currency: ActiveValue::Set("USD".to_string()),
                max_players: ActiveValue::Set(max_players),
                max_storage: ActiveValue::Set(max_storage),
                duration_days: ActiveValue::Set(30),
                features: ActiveValue::Set(serde_json::json!({ "tier": n })),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_mock_subscription(
        &self,
        academy_id: i32,
        plan_id: i32,
        status: SubscriptionStatus,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<SubscriptionModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Subscription::insert(entity::subscription::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                plan_id: ActiveValue::Set(plan_id),
                status: ActiveValue::Set(status),
                start_date: ActiveValue::Set(start_date),
                end_date: ActiveValue::Set(end_date),
                auto_renew: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an ACTIVE subscription that started yesterday and ends in 29 days.
    pub async fn insert_active_subscription(
        &self,
        academy_id: i32,
        plan_id: i32,
    ) -> Result<SubscriptionModel, TestError> {
        let now = Utc::now().naive_utc();

        self.insert_mock_subscription(
            academy_id,
            plan_id,
            SubscriptionStatus::Active,
            now - Duration::days(1),
            now + Duration::days(29),
        )
        .await
    }

    pub async fn insert_mock_payment(
        &self,
        academy_id: i32,
        subscription_id: i32,
        amount: Decimal,
        status: PaymentStatus,
    ) -> Result<PaymentModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Payment::insert(entity::payment::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                subscription_id: ActiveValue::Set(subscription_id),
                amount: ActiveValue::Set(amount),
                currency: ActiveValue::Set("USD".to_string()),
                status: ActiveValue::Set(status),
                payment_method: ActiveValue::Set("card".to_string()),
                transaction_id: ActiveValue::Set(None),
                payment_date: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
