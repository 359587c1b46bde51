use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{PaymentStatus, SubscriptionStatus};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    data::{
        activity::ActivityRepository,
        payment::PaymentRepository,
        subscription::{SubscriptionPlanRepository, SubscriptionRepository},
    },
    error::{billing::BillingError, query::QueryError, Error},
    model::activity::NewActivity,
    query::GroupRow,
    service::action,
    util::time::period_end,
};

/// Checks a payment status change against the payment lifecycle.
///
/// PENDING may become COMPLETED, FAILED or CANCELLED; COMPLETED may become REFUNDED.
/// Every other status is final.
pub fn check_payment_transition(
    from: PaymentStatus,
    to: PaymentStatus,
) -> Result<(), BillingError> {
    let allowed = matches!(
        (from, to),
        (PaymentStatus::Pending, PaymentStatus::Completed)
            | (PaymentStatus::Pending, PaymentStatus::Failed)
            | (PaymentStatus::Pending, PaymentStatus::Cancelled)
            | (PaymentStatus::Completed, PaymentStatus::Refunded)
    );

    if allowed {
        Ok(())
    } else {
        Err(BillingError::InvalidPaymentTransition { from, to })
    }
}

pub struct SubscriptionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriptionService<'a> {
    /// Creates a new instance of [`SubscriptionService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Requests a subscription to a plan
    ///
    /// Creates an INACTIVE subscription and a PENDING payment for the plan's price. The
    /// subscription becomes ACTIVE once the payment completes.
    ///
    /// # Returns
    /// - `Ok((subscription, payment))`: the pending subscription and its payment
    /// - `Err(QueryError::NotFound)`: unknown plan
    /// - `Err(BillingError::PlanInactive)`: the plan no longer accepts subscriptions
    pub async fn subscribe(
        &self,
        academy_id: i32,
        plan_id: i32,
        payment_method: &str,
        auto_renew: bool,
    ) -> Result<(entity::subscription::Model, entity::payment::Model), Error> {
        let txn = self.db.begin().await?;

        let plan = SubscriptionPlanRepository::new(&txn)
            .find_by_id(plan_id)
            .await?
            .ok_or(QueryError::NotFound {
                model: "SubscriptionPlan",
            })?;

        if !plan.is_active {
            return Err(BillingError::PlanInactive(plan_id).into());
        }

        // Tentative period, replaced when the payment completes
        let now = Utc::now().naive_utc();
        let subscription = SubscriptionRepository::new(&txn)
            .create(
                academy_id,
                plan.id,
                SubscriptionStatus::Inactive,
                now,
                period_end(now, plan.duration_days)?,
                auto_renew,
            )
            .await?;

        let payment = PaymentRepository::new(&txn)
            .create_pending(
                academy_id,
                subscription.id,
                plan.price,
                plan.currency.clone(),
                payment_method.to_string(),
            )
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::SUBSCRIPTION_REQUESTED,
                    format!("Subscription to plan {} requested", plan.name),
                )
                .academy(academy_id)
                .metadata(json!({
                    "subscription_id": subscription.id,
                    "payment_id": payment.id,
                })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            academy_id,
            subscription_id = subscription.id,
            payment_id = payment.id,
            "requested subscription"
        );

        Ok((subscription, payment))
    }

    /// Completes a pending payment and activates its subscription
    ///
    /// The period starts now and lasts the plan's `duration_days`. When the subscription
    /// is still running (a renewal) the new period starts at its current end instead.
    /// Any other ACTIVE subscription of the academy is cancelled.
    ///
    /// # Returns
    /// - `Ok(Model)`: the activated subscription
    /// - `Err(BillingError::InvalidPaymentTransition)`: the payment isn't PENDING
    /// - `Err(BillingError::SubscriptionClosed)`: the subscription was cancelled or expired
    pub async fn complete_payment(
        &self,
        payment_id: i32,
        transaction_id: Option<String>,
    ) -> Result<entity::subscription::Model, Error> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let payment_repository = PaymentRepository::new(&txn);
        let subscription_repository = SubscriptionRepository::new(&txn);

        let payment = payment_repository
            .find_by_id(payment_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Payment" })?;
        check_payment_transition(payment.status, PaymentStatus::Completed)?;

        let subscription = subscription_repository
            .find_by_id(payment.subscription_id)
            .await?
            .ok_or(QueryError::NotFound {
                model: "Subscription",
            })?;
        ensure_open(&subscription)?;

        payment_repository
            .set_status(payment_id, PaymentStatus::Completed, transaction_id, Some(now))
            .await?;
        let plan = SubscriptionPlanRepository::new(&txn)
            .find_by_id(subscription.plan_id)
            .await?
            .ok_or(QueryError::NotFound {
                model: "SubscriptionPlan",
            })?;

        let (start_date, period_start) = renewal_start(&subscription, now);
        let subscription = subscription_repository
            .activate(
                subscription.id,
                start_date,
                period_end(period_start, plan.duration_days)?,
            )
            .await?;

        let cancelled = subscription_repository
            .cancel_other_active(subscription.academy_id, subscription.id)
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::SUBSCRIPTION_ACTIVATED,
                    format!(
                        "Subscription to plan {} active until {}",
                        plan.name, subscription.end_date
                    ),
                )
                .academy(subscription.academy_id)
                .metadata(json!({
                    "subscription_id": subscription.id,
                    "payment_id": payment.id,
                    "cancelled_subscriptions": cancelled,
                })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            payment_id,
            subscription_id = subscription.id,
            "completed payment and activated subscription"
        );

        Ok(subscription)
    }

    pub async fn fail_payment(&self, payment_id: i32) -> Result<entity::payment::Model, Error> {
        self.transition_payment(payment_id, PaymentStatus::Failed, action::PAYMENT_FAILED)
            .await
    }

    pub async fn cancel_payment(&self, payment_id: i32) -> Result<entity::payment::Model, Error> {
        self.transition_payment(
            payment_id,
            PaymentStatus::Cancelled,
            action::PAYMENT_CANCELLED,
        )
        .await
    }

    /// Refunds a completed payment. The subscription it paid for is left unchanged.
    pub async fn refund_payment(&self, payment_id: i32) -> Result<entity::payment::Model, Error> {
        self.transition_payment(
            payment_id,
            PaymentStatus::Refunded,
            action::PAYMENT_REFUNDED,
        )
        .await
    }

    async fn transition_payment(
        &self,
        payment_id: i32,
        to: PaymentStatus,
        audit_action: &str,
    ) -> Result<entity::payment::Model, Error> {
        let txn = self.db.begin().await?;

        let payment_repository = PaymentRepository::new(&txn);

        let payment = payment_repository
            .find_by_id(payment_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Payment" })?;
        check_payment_transition(payment.status, to)?;

        let payment = payment_repository
            .set_status(payment_id, to, None, None)
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    audit_action,
                    format!("Payment {} moved to {:?}", payment.id, to),
                )
                .academy(payment.academy_id)
                .metadata(json!({ "payment_id": payment.id })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(payment_id, status = ?to, "updated payment status");

        Ok(payment)
    }

    /// Cancels one of the academy's subscriptions along with its PENDING payments
    ///
    /// # Returns
    /// - `Ok(Model)`: the cancelled subscription
    /// - `Err(QueryError::NotFound)`: no such subscription for this academy
    /// - `Err(BillingError::SubscriptionClosed)`: the subscription was already cancelled or expired
    pub async fn cancel(
        &self,
        academy_id: i32,
        subscription_id: i32,
    ) -> Result<entity::subscription::Model, Error> {
        let txn = self.db.begin().await?;

        let subscription_repository = SubscriptionRepository::new(&txn);

        let subscription = subscription_repository
            .find_by_id(subscription_id)
            .await?
            .filter(|subscription| subscription.academy_id == academy_id)
            .ok_or(QueryError::NotFound {
                model: "Subscription",
            })?;
        ensure_open(&subscription)?;

        let subscription = subscription_repository
            .set_status(subscription_id, SubscriptionStatus::Cancelled)
            .await?;
        let cancelled_payments = PaymentRepository::new(&txn)
            .cancel_pending_for_subscription(subscription_id)
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(action::SUBSCRIPTION_CANCELLED, "Subscription cancelled")
                    .academy(academy_id)
                    .metadata(json!({
                        "subscription_id": subscription_id,
                        "cancelled_payments": cancelled_payments,
                    })),
            )
            .await?;

        txn.commit().await?;

        Ok(subscription)
    }

    /// Marks every ACTIVE subscription whose period ended at or before `now` as EXPIRED
    ///
    /// # Returns
    /// The number of expired subscriptions
    pub async fn expire_due(&self, now: NaiveDateTime) -> Result<u64, Error> {
        let txn = self.db.begin().await?;

        let expired = SubscriptionRepository::new(&txn).expire_due(now).await?;

        let activity_repository = ActivityRepository::new(&txn);
        for subscription in &expired {
            activity_repository
                .append(
                    NewActivity::new(
                        action::SUBSCRIPTION_EXPIRED,
                        format!("Subscription ended on {}", subscription.end_date),
                    )
                    .academy(subscription.academy_id)
                    .metadata(json!({ "subscription_id": subscription.id })),
                )
                .await?;
        }

        txn.commit().await?;

        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "expired subscriptions");
        }

        Ok(expired.len() as u64)
    }

    /// Payment count and amount total per status and currency
    pub async fn revenue_by_status(
        &self,
        academy_id: Option<i32>,
    ) -> Result<Vec<GroupRow>, Error> {
        PaymentRepository::new(self.db)
            .revenue_by_status(academy_id)
            .await
    }
}

/// Only INACTIVE and ACTIVE subscriptions may still be paid for or cancelled.
fn ensure_open(subscription: &entity::subscription::Model) -> Result<(), BillingError> {
    match subscription.status {
        SubscriptionStatus::Inactive | SubscriptionStatus::Active => Ok(()),
        status => Err(BillingError::SubscriptionClosed {
            subscription_id: subscription.id,
            status,
        }),
    }
}

/// Returns the stored start date and the date the new period counts from.
///
/// A running ACTIVE subscription keeps its start date and extends from its end date.
fn renewal_start(
    subscription: &entity::subscription::Model,
    now: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    if subscription.status == SubscriptionStatus::Active && subscription.end_date > now {
        (subscription.start_date, subscription.end_date)
    } else {
        (now, now)
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::PaymentStatus;

    use super::check_payment_transition;

    /// Expect every transition out of PENDING and the refund of COMPLETED to be allowed
    #[test]
    fn allows_lifecycle_transitions() {
        for to in [
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::Cancelled,
        ] {
            assert!(check_payment_transition(PaymentStatus::Pending, to).is_ok());
        }
        assert!(
            check_payment_transition(PaymentStatus::Completed, PaymentStatus::Refunded).is_ok()
        );
    }

    /// Expect final statuses to reject every change
    #[test]
    fn rejects_transitions_out_of_final_statuses() {
        for from in [
            PaymentStatus::Failed,
            PaymentStatus::Cancelled,
            PaymentStatus::Refunded,
        ] {
            for to in [
                PaymentStatus::Pending,
                PaymentStatus::Completed,
                PaymentStatus::Refunded,
            ] {
                assert!(check_payment_transition(from, to).is_err());
            }
        }
    }

    /// Expect a pending payment to never be refunded directly
    #[test]
    fn rejects_refund_of_pending_payment() {
        assert!(
            check_payment_transition(PaymentStatus::Pending, PaymentStatus::Refunded).is_err()
        );
    }
}
