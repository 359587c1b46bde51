use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, EntityTrait};

/// Entity that can be served by a [`Delegate`](super::Delegate).
pub trait DelegateEntity: EntityTrait {
    /// Model name used in not-found errors and log events.
    const MODEL_NAME: &'static str;

    /// Write the entity's timestamps before the model is persisted.
    ///
    /// `insert` is true for creates. Values already set by the caller for `created_at`
    /// are kept so imports can carry their original creation time.
    fn stamp(model: &mut Self::ActiveModel, now: NaiveDateTime, insert: bool);
}

/// Marker for entities whose rows may be updated or deleted after insert.
///
/// Activity log entries are append-only and don't implement it, so `update*`, `upsert`
/// and `delete*` are not available on their delegate.
pub trait MutableEntity: DelegateEntity {}

macro_rules! timestamped_entity {
    ($module:ident, $name:literal) => {
        impl DelegateEntity for entity::$module::Entity {
            const MODEL_NAME: &'static str = $name;

            fn stamp(model: &mut entity::$module::ActiveModel, now: NaiveDateTime, insert: bool) {
                if insert && model.created_at.is_not_set() {
                    model.created_at = ActiveValue::Set(now);
                }
                model.updated_at = ActiveValue::Set(now);
            }
        }

        impl MutableEntity for entity::$module::Entity {}
    };
}

timestamped_entity!(academy, "Academy");
timestamped_entity!(player, "Player");
timestamped_entity!(subscription_plan, "SubscriptionPlan");
timestamped_entity!(subscription, "Subscription");
timestamped_entity!(document, "Document");
timestamped_entity!(payment, "Payment");
timestamped_entity!(admin, "Admin");
timestamped_entity!(system_setting, "SystemSetting");

impl DelegateEntity for entity::activity::Entity {
    const MODEL_NAME: &'static str = "Activity";

    fn stamp(model: &mut entity::activity::ActiveModel, now: NaiveDateTime, insert: bool) {
        if insert && model.created_at.is_not_set() {
            model.created_at = ActiveValue::Set(now);
        }
    }
}
