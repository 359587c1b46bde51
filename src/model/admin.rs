use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::AdminRole;
use sea_orm::ActiveEnum;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct AdminDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    /// Stored role value, e.g. `SUPER_ADMIN`
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<entity::admin::Model> for AdminDto {
    fn from(model: entity::admin::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role.to_value(),
            is_active: model.is_active,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: AdminRole,
}
