use chrono::Utc;
use entity::sea_orm_active_enums::AdminRole;
use sea_orm::DatabaseConnection;

use crate::{
    data::admin::AdminRepository,
    error::{auth::AuthError, query::QueryError, Error},
    model::admin::{AdminDto, NewAdmin},
    util::password::{hash_password, reject_unknown_account, verify_password},
};

/// Rank of a role, higher ranks include every permission of lower ones
fn role_rank(role: AdminRole) -> u8 {
    match role {
        AdminRole::Moderator => 1,
        AdminRole::Admin => 2,
        AdminRole::SuperAdmin => 3,
    }
}

/// Returns true when `actual` grants at least the permissions of `required`
pub fn has_role(actual: AdminRole, required: AdminRole) -> bool {
    role_rank(actual) >= role_rank(required)
}

/// Checks that an admin account is active and holds at least `required`
pub fn ensure_role(admin: &entity::admin::Model, required: AdminRole) -> Result<(), Error> {
    if !admin.is_active {
        return Err(AuthError::AccountInactive.into());
    }

    if !has_role(admin.role, required) {
        return Err(AuthError::InsufficientRole {
            required,
            actual: admin.role,
        }
        .into());
    }

    Ok(())
}

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    /// Creates a new instance of [`AdminService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an admin account, hashing the provided plaintext password
    ///
    /// # Returns
    /// - `Ok(AdminDto)`: the created account
    /// - `Err(Error::QueryError(QueryError::UniqueConstraint))`: the email is already taken
    pub async fn create_admin(&self, admin: NewAdmin) -> Result<AdminDto, Error> {
        let password_hash = hash_password(&admin.password)?;
        let model = AdminRepository::new(self.db)
            .create(admin, password_hash)
            .await?;

        tracing::info!(admin_id = model.id, role = ?model.role, "created admin account");

        Ok(model.into())
    }

    /// Verifies an admin's credentials and records the login time
    ///
    /// Unknown emails and wrong passwords both return [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AdminDto, Error> {
        let admin_repository = AdminRepository::new(self.db);

        let Some(admin) = admin_repository.find_by_email(email).await? else {
            return Err(reject_unknown_account(password));
        };

        verify_password(password, &admin.password)?;

        if !admin.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        let admin = admin_repository
            .record_login(admin.id, Utc::now().naive_utc())
            .await?;

        tracing::info!(admin_id = admin.id, "admin logged in");

        Ok(admin.into())
    }

    /// Loads an admin and checks it may perform an action requiring `required`
    ///
    /// # Returns
    /// - `Ok(Model)`: the active admin holding at least `required`
    /// - `Err(QueryError::NotFound)`: no admin with that ID
    /// - `Err(AuthError::AccountInactive | AuthError::InsufficientRole)`: the admin may not act
    pub async fn require_role(
        &self,
        admin_id: i32,
        required: AdminRole,
    ) -> Result<entity::admin::Model, Error> {
        let admin = AdminRepository::new(self.db)
            .find_by_id(admin_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Admin" })?;

        ensure_role(&admin, required)?;

        Ok(admin)
    }
}
