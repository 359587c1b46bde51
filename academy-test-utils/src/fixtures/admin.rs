use chrono::Utc;
use entity::sea_orm_active_enums::AdminRole;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::TEST_PASSWORD_PLACEHOLDER, error::TestError, model::AdminModel, TestSetup,
};

impl TestSetup {
    pub fn admin<'a>(&'a self) -> AdminFixtures<'a> {
        AdminFixtures { setup: self }
    }
}

pub struct AdminFixtures<'a> {
    setup: &'a TestSetup,
}

impl<'a> AdminFixtures<'a> {
    /// Insert an active operator account with email `admin{n}@example.com`.
    pub async fn insert_mock_admin(&self, n: i32, role: AdminRole) -> Result<AdminModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Admin::insert(entity::admin::ActiveModel {
                email: ActiveValue::Set(format!("admin{}@example.com", n)),
                password: ActiveValue::Set(TEST_PASSWORD_PLACEHOLDER.to_string()),
                name: ActiveValue::Set(format!("Admin {}", n)),
                role: ActiveValue::Set(role),
                is_active: ActiveValue::Set(true),
                last_login_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
