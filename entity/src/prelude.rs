pub use super::academy::Entity as Academy;
pub use super::activity::Entity as Activity;
pub use super::admin::Entity as Admin;
pub use super::document::Entity as Document;
pub use super::payment::Entity as Payment;
pub use super::player::Entity as Player;
pub use super::subscription::Entity as Subscription;
pub use super::subscription_plan::Entity as SubscriptionPlan;
pub use super::system_setting::Entity as SystemSetting;
