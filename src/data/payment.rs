use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::PaymentStatus;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait};

use crate::{
    error::Error,
    query::{Delegates, FindArgs, GroupByArgs, GroupOrder, GroupRow, PaymentKey, SortOrder},
};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_pending(
        &self,
        academy_id: i32,
        subscription_id: i32,
        amount: Decimal,
        currency: String,
        payment_method: String,
    ) -> Result<entity::payment::Model, Error> {
        self.db
            .payment()
            .create(entity::payment::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                subscription_id: ActiveValue::Set(subscription_id),
                amount: ActiveValue::Set(amount),
                currency: ActiveValue::Set(currency),
                status: ActiveValue::Set(PaymentStatus::Pending),
                payment_method: ActiveValue::Set(payment_method),
                transaction_id: ActiveValue::Set(None),
                payment_date: ActiveValue::Set(None),
                ..Default::default()
            })
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::payment::Model>, Error> {
        self.db.payment().find_unique(id).await
    }

    pub async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<entity::payment::Model>, Error> {
        self.db
            .payment()
            .find_unique(PaymentKey::TransactionId(transaction_id.to_string()))
            .await
    }

    /// Moves the payment to `status`.
    ///
    /// `transaction_id` and `payment_date` are only written when provided.
    pub async fn set_status(
        &self,
        id: i32,
        status: PaymentStatus,
        transaction_id: Option<String>,
        payment_date: Option<NaiveDateTime>,
    ) -> Result<entity::payment::Model, Error> {
        let mut data = entity::payment::ActiveModel {
            status: ActiveValue::Set(status),
            ..Default::default()
        };
        if let Some(transaction_id) = transaction_id {
            data.transaction_id = ActiveValue::Set(Some(transaction_id));
        }
        if let Some(payment_date) = payment_date {
            data.payment_date = ActiveValue::Set(Some(payment_date));
        }

        self.db.payment().update(id, data).await
    }

    /// Cancels the subscription's payments that are still PENDING
    pub async fn cancel_pending_for_subscription(
        &self,
        subscription_id: i32,
    ) -> Result<u64, Error> {
        use entity::payment::Column;

        self.db
            .payment()
            .update_many(
                Condition::all()
                    .add(Column::SubscriptionId.eq(subscription_id))
                    .add(Column::Status.eq(PaymentStatus::Pending)),
                entity::payment::ActiveModel {
                    status: ActiveValue::Set(PaymentStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn list_for_academy(
        &self,
        academy_id: i32,
    ) -> Result<Vec<entity::payment::Model>, Error> {
        use entity::payment::Column;

        self.db
            .payment()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::AcademyId.eq(academy_id)))
                    .order_by(Column::CreatedAt, SortOrder::Desc),
            )
            .await
    }

    /// Payment count and amount total per status and currency, optionally for one academy
    pub async fn revenue_by_status(
        &self,
        academy_id: Option<i32>,
    ) -> Result<Vec<GroupRow>, Error> {
        use entity::payment::Column;

        let mut filter = Condition::all();
        if let Some(academy_id) = academy_id {
            filter = filter.add(Column::AcademyId.eq(academy_id));
        }

        self.db
            .payment()
            .group_by(
                GroupByArgs::new(vec![Column::Status, Column::Currency])
                    .filter(filter)
                    .count_all()
                    .sum(Column::Amount)
                    .order_by(GroupOrder::Column(Column::Status), SortOrder::Asc)
                    .order_by(GroupOrder::Column(Column::Currency), SortOrder::Asc),
            )
            .await
    }
}
