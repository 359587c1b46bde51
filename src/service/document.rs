use chrono::Utc;
use entity::sea_orm_active_enums::AdminRole;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    data::{
        academy::AcademyRepository, activity::ActivityRepository, document::DocumentRepository,
        player::PlayerRepository, subscription::SubscriptionRepository,
    },
    error::{billing::BillingError, document::DocumentError, query::QueryError, Error},
    model::{activity::NewActivity, document::NewDocument},
    service::{action, admin::AdminService},
};

pub struct DocumentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentService<'a> {
    /// Creates a new instance of [`DocumentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an uploaded document and charges its size to the academy's storage
    ///
    /// The quota is enforced by the `storage_used` increment itself, which runs in one
    /// transaction with the insert.
    ///
    /// # Returns
    /// - `Ok(Model)`: the stored document
    /// - `Err(DocumentError::InvalidFileSize)`: `file_size` isn't positive
    /// - `Err(DocumentError::PlayerNotInAcademy)`: `player_id` belongs to another academy
    /// - `Err(BillingError::NoActiveSubscription)`: the academy has no current subscription
    /// - `Err(BillingError::StorageQuotaExceeded)`: the upload would exceed the plan's `max_storage`
    pub async fn upload(
        &self,
        academy_id: i32,
        document: NewDocument,
    ) -> Result<entity::document::Model, Error> {
        if document.file_size <= 0 {
            return Err(DocumentError::InvalidFileSize(document.file_size).into());
        }

        let txn = self.db.begin().await?;

        if let Some(player_id) = document.player_id {
            PlayerRepository::new(&txn)
                .find_in_academy(academy_id, player_id)
                .await?
                .ok_or(DocumentError::PlayerNotInAcademy {
                    academy_id,
                    player_id,
                })?;
        }

        let (_, plan) = SubscriptionRepository::new(&txn)
            .find_active_with_plan(academy_id, Utc::now().naive_utc())
            .await?
            .ok_or(BillingError::NoActiveSubscription(academy_id))?;

        let academy_repository = AcademyRepository::new(&txn);

        let charged = academy_repository
            .charge_storage(academy_id, document.file_size, plan.max_storage)
            .await?;
        if !charged {
            let academy = academy_repository
                .find_by_id(academy_id)
                .await?
                .ok_or(QueryError::NotFound { model: "Academy" })?;

            return Err(BillingError::StorageQuotaExceeded {
                academy_id,
                used: academy.storage_used,
                requested: document.file_size,
                limit: plan.max_storage,
            }
            .into());
        }

        let document = DocumentRepository::new(&txn)
            .create(academy_id, document)
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::DOCUMENT_UPLOADED,
                    format!("Document {} uploaded", document.original_name),
                )
                .academy(academy_id)
                .metadata(json!({
                    "document_id": document.id,
                    "file_size": document.file_size,
                })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            academy_id,
            document_id = document.id,
            file_size = document.file_size,
            "uploaded document"
        );

        Ok(document)
    }

    /// Deletes a document and releases its size from the academy's storage
    pub async fn delete(
        &self,
        academy_id: i32,
        document_id: i32,
    ) -> Result<entity::document::Model, Error> {
        let txn = self.db.begin().await?;

        let document_repository = DocumentRepository::new(&txn);

        let document = document_repository
            .find_by_id(document_id)
            .await?
            .filter(|document| document.academy_id == academy_id)
            .ok_or(QueryError::NotFound { model: "Document" })?;

        document_repository.delete(document.id).await?;
        AcademyRepository::new(&txn)
            .increment_storage_used(academy_id, -document.file_size)
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::DOCUMENT_DELETED,
                    format!("Document {} deleted", document.original_name),
                )
                .academy(academy_id)
                .metadata(json!({ "document_id": document.id })),
            )
            .await?;

        txn.commit().await?;

        Ok(document)
    }

    /// Marks a document as verified by an admin
    ///
    /// Requires [`AdminRole::Moderator`] or above. `verified_by` records the admin's email.
    ///
    /// # Returns
    /// - `Ok(Model)`: the verified document
    /// - `Err(DocumentError::AlreadyVerified)`: the document was verified before
    pub async fn verify(
        &self,
        admin_id: i32,
        document_id: i32,
    ) -> Result<entity::document::Model, Error> {
        let admin = AdminService::new(self.db)
            .require_role(admin_id, AdminRole::Moderator)
            .await?;

        let txn = self.db.begin().await?;

        let document_repository = DocumentRepository::new(&txn);

        let document = document_repository
            .find_by_id(document_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Document" })?;

        if document.is_verified {
            return Err(DocumentError::AlreadyVerified(document_id).into());
        }

        let document = document_repository
            .mark_verified(document_id, admin.email.clone(), Utc::now().naive_utc())
            .await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::DOCUMENT_VERIFIED,
                    format!(
                        "Document {} verified by {}",
                        document.original_name, admin.email
                    ),
                )
                .academy(document.academy_id)
                .admin(admin.id)
                .metadata(json!({ "document_id": document.id })),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(document_id, admin_id, "verified document");

        Ok(document)
    }
}
