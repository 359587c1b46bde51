//! Database model type aliases for test utilities.

pub type AcademyModel = entity::academy::Model;
pub type PlayerModel = entity::player::Model;
pub type SubscriptionPlanModel = entity::subscription_plan::Model;
pub type SubscriptionModel = entity::subscription::Model;
pub type DocumentModel = entity::document::Model;
pub type PaymentModel = entity::payment::Model;
pub type AdminModel = entity::admin::Model;
pub type ActivityModel = entity::activity::Model;
