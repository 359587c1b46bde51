use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, ConnectionTrait};

use crate::{
    error::Error,
    model::admin::NewAdmin,
    query::{AdminKey, Delegates},
};

pub struct AdminRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdminRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active admin. `password_hash` must already be hashed.
    pub async fn create(
        &self,
        admin: NewAdmin,
        password_hash: String,
    ) -> Result<entity::admin::Model, Error> {
        self.db
            .admin()
            .create(entity::admin::ActiveModel {
                email: ActiveValue::Set(admin.email),
                password: ActiveValue::Set(password_hash),
                name: ActiveValue::Set(admin.name),
                role: ActiveValue::Set(admin.role),
                is_active: ActiveValue::Set(true),
                last_login_at: ActiveValue::Set(None),
                ..Default::default()
            })
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::admin::Model>, Error> {
        self.db.admin().find_unique(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::admin::Model>, Error> {
        self.db
            .admin()
            .find_unique(AdminKey::Email(email.to_string()))
            .await
    }

    pub async fn record_login(
        &self,
        id: i32,
        at: NaiveDateTime,
    ) -> Result<entity::admin::Model, Error> {
        self.db
            .admin()
            .update(
                id,
                entity::admin::ActiveModel {
                    last_login_at: ActiveValue::Set(Some(at)),
                    ..Default::default()
                },
            )
            .await
    }
}
