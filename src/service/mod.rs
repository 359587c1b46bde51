//! Service layer for business logic and orchestration.
//!
//! Services enforce the rules the schema can't express on its own: password hashing and
//! authentication, admin role checks, plan limits on players and storage, the payment
//! state machine and subscription lifecycle. Multi-step writes run in a transaction and
//! record an audit log entry alongside the change.

pub mod academy;
pub mod activity;
pub mod admin;
pub mod document;
pub mod player;
pub mod retry;
pub mod setting;
pub mod subscription;

/// Audit log action names recorded by the services.
pub mod action {
    pub const ACADEMY_REGISTERED: &str = "ACADEMY_REGISTERED";
    pub const ACADEMY_PASSWORD_CHANGED: &str = "ACADEMY_PASSWORD_CHANGED";
    pub const ACADEMY_ACTIVATED: &str = "ACADEMY_ACTIVATED";
    pub const ACADEMY_DEACTIVATED: &str = "ACADEMY_DEACTIVATED";
    pub const ACADEMY_VERIFIED: &str = "ACADEMY_VERIFIED";
    pub const PLAYER_ENROLLED: &str = "PLAYER_ENROLLED";
    pub const PLAYER_DEACTIVATED: &str = "PLAYER_DEACTIVATED";
    pub const DOCUMENT_UPLOADED: &str = "DOCUMENT_UPLOADED";
    pub const DOCUMENT_DELETED: &str = "DOCUMENT_DELETED";
    pub const DOCUMENT_VERIFIED: &str = "DOCUMENT_VERIFIED";
    pub const SUBSCRIPTION_REQUESTED: &str = "SUBSCRIPTION_REQUESTED";
    pub const SUBSCRIPTION_ACTIVATED: &str = "SUBSCRIPTION_ACTIVATED";
    pub const SUBSCRIPTION_CANCELLED: &str = "SUBSCRIPTION_CANCELLED";
    pub const SUBSCRIPTION_EXPIRED: &str = "SUBSCRIPTION_EXPIRED";
    pub const PAYMENT_FAILED: &str = "PAYMENT_FAILED";
    pub const PAYMENT_CANCELLED: &str = "PAYMENT_CANCELLED";
    pub const PAYMENT_REFUNDED: &str = "PAYMENT_REFUNDED";
}
