use entity::sea_orm_active_enums::AdminRole;
use sea_orm::{ActiveValue, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    data::{academy::AcademyRepository, activity::ActivityRepository},
    error::{auth::AuthError, query::QueryError, Error},
    model::{
        academy::{AcademyDto, NewAcademy},
        activity::NewActivity,
    },
    service::{action, admin::AdminService},
    util::password::{hash_password, reject_unknown_account, verify_password},
};

pub struct AcademyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AcademyService<'a> {
    /// Creates a new instance of [`AcademyService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new academy account
    ///
    /// The academy starts active and unverified with no storage used. Registration and
    /// its audit entry are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(AcademyDto)`: the registered academy
    /// - `Err(Error::QueryError(QueryError::UniqueConstraint))`: email or license number already registered
    pub async fn register(&self, form: NewAcademy) -> Result<AcademyDto, Error> {
        let password_hash = hash_password(&form.password)?;

        let txn = self.db.begin().await?;

        let academy = AcademyRepository::new(&txn)
            .create(entity::academy::ActiveModel {
                name: ActiveValue::Set(form.name),
                email: ActiveValue::Set(form.email),
                password: ActiveValue::Set(password_hash),
                phone: ActiveValue::Set(form.phone),
                address: ActiveValue::Set(form.address),
                city: ActiveValue::Set(form.city),
                country: ActiveValue::Set(form.country),
                website: ActiveValue::Set(form.website),
                logo_url: ActiveValue::Set(None),
                license_number: ActiveValue::Set(form.license_number),
                license_expires_at: ActiveValue::Set(form.license_expires_at),
                is_active: ActiveValue::Set(true),
                is_verified: ActiveValue::Set(false),
                storage_used: ActiveValue::Set(0),
                ..Default::default()
            })
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::ACADEMY_REGISTERED,
                    format!("Academy {} registered", academy.name),
                )
                .academy(academy.id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(academy_id = academy.id, "registered academy");

        Ok(academy.into())
    }

    pub async fn get(&self, academy_id: i32) -> Result<AcademyDto, Error> {
        AcademyRepository::new(self.db)
            .find_by_id(academy_id)
            .await?
            .map(AcademyDto::from)
            .ok_or_else(|| QueryError::NotFound { model: "Academy" }.into())
    }

    /// Verifies an academy's credentials
    ///
    /// Unknown emails and wrong passwords both return [`AuthError::InvalidCredentials`],
    /// deactivated academies with correct credentials return [`AuthError::AccountInactive`].
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AcademyDto, Error> {
        let Some(academy) = AcademyRepository::new(self.db).find_by_email(email).await? else {
            return Err(reject_unknown_account(password));
        };

        verify_password(password, &academy.password)?;

        if !academy.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        Ok(academy.into())
    }

    /// Replaces the academy's password after checking the current one
    pub async fn change_password(
        &self,
        academy_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let academy_repository = AcademyRepository::new(self.db);

        let academy = academy_repository
            .find_by_id(academy_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Academy" })?;

        verify_password(current_password, &academy.password)?;

        let password_hash = hash_password(new_password)?;

        let txn = self.db.begin().await?;

        AcademyRepository::new(&txn)
            .set_password(academy_id, password_hash)
            .await?;
        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(action::ACADEMY_PASSWORD_CHANGED, "Password changed")
                    .academy(academy_id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(academy_id, "changed academy password");

        Ok(())
    }

    /// Activates or deactivates an academy on behalf of an admin
    ///
    /// Requires [`AdminRole::Admin`] or above.
    pub async fn set_active(
        &self,
        admin_id: i32,
        academy_id: i32,
        is_active: bool,
    ) -> Result<AcademyDto, Error> {
        AdminService::new(self.db)
            .require_role(admin_id, AdminRole::Admin)
            .await?;

        let txn = self.db.begin().await?;

        let academy = AcademyRepository::new(&txn)
            .set_active(academy_id, is_active)
            .await?;

        let (action, verb) = if is_active {
            (action::ACADEMY_ACTIVATED, "activated")
        } else {
            (action::ACADEMY_DEACTIVATED, "deactivated")
        };
        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(action, format!("Academy {} {}", academy.name, verb))
                    .academy(academy_id)
                    .admin(admin_id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(academy_id, admin_id, is_active, "changed academy status");

        Ok(academy.into())
    }

    /// Marks an academy as verified on behalf of an admin
    ///
    /// Requires [`AdminRole::Admin`] or above.
    pub async fn verify(&self, admin_id: i32, academy_id: i32) -> Result<AcademyDto, Error> {
        let admin = AdminService::new(self.db)
            .require_role(admin_id, AdminRole::Admin)
            .await?;

        let txn = self.db.begin().await?;

        let academy = AcademyRepository::new(&txn)
            .set_verified(academy_id, true)
            .await?;
        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::ACADEMY_VERIFIED,
                    format!("Academy {} verified", academy.name),
                )
                .academy(academy_id)
                .admin(admin_id)
                .metadata(json!({ "verified_by": admin.email })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(academy_id, admin_id, "verified academy");

        Ok(academy.into())
    }
}
