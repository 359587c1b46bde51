use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, LockType},
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect,
};

use crate::{
    error::{query::QueryError, Error},
    query::{AcademyKey, Delegates},
};

pub struct AcademyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AcademyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        academy: entity::academy::ActiveModel,
    ) -> Result<entity::academy::Model, Error> {
        self.db.academy().create(academy).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::academy::Model>, Error> {
        self.db.academy().find_unique(id).await
    }

    /// Loads the academy holding a row lock until the surrounding transaction ends.
    ///
    /// Serialises quota checks of concurrent transactions on Postgres; SQLite already
    /// serialises writers and builds the query without a lock clause.
    pub async fn find_by_id_for_update(
        &self,
        id: i32,
    ) -> Result<Option<entity::academy::Model>, Error> {
        let academy = entity::prelude::Academy::find_by_id(id)
            .lock(LockType::Update)
            .one(self.db)
            .await?;

        Ok(academy)
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::academy::Model>, Error> {
        self.db
            .academy()
            .find_unique(AcademyKey::Email(email.to_string()))
            .await
    }

    pub async fn find_by_license_number(
        &self,
        license_number: &str,
    ) -> Result<Option<entity::academy::Model>, Error> {
        self.db
            .academy()
            .find_unique(AcademyKey::LicenseNumber(license_number.to_string()))
            .await
    }

    pub async fn set_password(
        &self,
        id: i32,
        password_hash: String,
    ) -> Result<entity::academy::Model, Error> {
        self.db
            .academy()
            .update(
                id,
                entity::academy::ActiveModel {
                    password: ActiveValue::Set(password_hash),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn set_active(
        &self,
        id: i32,
        is_active: bool,
    ) -> Result<entity::academy::Model, Error> {
        self.db
            .academy()
            .update(
                id,
                entity::academy::ActiveModel {
                    is_active: ActiveValue::Set(is_active),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn set_verified(
        &self,
        id: i32,
        is_verified: bool,
    ) -> Result<entity::academy::Model, Error> {
        self.db
            .academy()
            .update(
                id,
                entity::academy::ActiveModel {
                    is_verified: ActiveValue::Set(is_verified),
                    ..Default::default()
                },
            )
            .await
    }

    /// Adds `size` bytes to the academy's storage counter if the total stays within `limit`.
    ///
    /// The limit is checked in the same statement as the addition, so concurrent uploads
    /// can't push the counter past it.
    ///
    /// # Returns
    /// - `Ok(true)`: the counter was charged
    /// - `Ok(false)`: the academy doesn't exist or the charge would exceed `limit`
    pub async fn charge_storage(&self, id: i32, size: i64, limit: i64) -> Result<bool, Error> {
        use entity::academy::Column;

        let result = entity::prelude::Academy::update_many()
            .col_expr(
                Column::StorageUsed,
                Expr::col(Column::StorageUsed).add(size).into(),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
            .filter(Column::Id.eq(id))
            .filter(Expr::expr(Expr::col(Column::StorageUsed).add(size)).lte(limit))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Adds `delta` bytes (negative to release) to the academy's storage counter.
    ///
    /// # Notes
    /// - The addition runs in SQL so concurrent uploads don't overwrite each other
    /// - The counter is clamped at zero when releasing more than is recorded
    pub async fn increment_storage_used(&self, id: i32, delta: i64) -> Result<(), Error> {
        use entity::academy::Column;

        let sum = Expr::col(Column::StorageUsed).add(delta);
        let new_value =
            Expr::case(Expr::expr(sum.clone()).lt(0i64), Expr::value(0i64)).finally(sum);

        let result = entity::prelude::Academy::update_many()
            .col_expr(Column::StorageUsed, new_value.into())
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
            .filter(Column::Id.eq(id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(QueryError::NotFound { model: "Academy" }.into());
        }

        Ok(())
    }
}
