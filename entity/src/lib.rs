pub mod prelude;

pub mod academy;
pub mod activity;
pub mod admin;
pub mod document;
pub mod payment;
pub mod player;
pub mod sea_orm_active_enums;
pub mod subscription;
pub mod subscription_plan;
pub mod system_setting;
