use entity::sea_orm_active_enums::{PaymentStatus, SubscriptionStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Academy ID {0} has no active subscription")]
    NoActiveSubscription(i32),
    #[error("Subscription plan ID {0} is not available for new subscriptions")]
    PlanInactive(i32),
    #[error("Player limit of {limit} reached for academy ID {academy_id}")]
    PlayerLimitReached { academy_id: i32, limit: i32 },
    #[error(
        "Storage quota exceeded for academy ID {academy_id}: {used} of {limit} bytes used, {requested} requested"
    )]
    StorageQuotaExceeded {
        academy_id: i32,
        used: i64,
        requested: i64,
        limit: i64,
    },
    #[error("Payment cannot move from {from:?} to {to:?}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("Subscription ID {subscription_id} is {status:?} and can no longer change")]
    SubscriptionClosed {
        subscription_id: i32,
        status: SubscriptionStatus,
    },
}
