use academy::{
    data::academy::AcademyRepository,
    error::{
        auth::AuthError, billing::BillingError, document::DocumentError, query::QueryError, Error,
    },
    model::document::NewDocument,
    service::document::DocumentService,
};
use entity::sea_orm_active_enums::{AdminRole, DocumentType};

use super::*;

fn new_document(player_id: Option<i32>, file_size: i64) -> NewDocument {
    NewDocument {
        player_id,
        file_name: "birth-certificate.pdf".to_string(),
        original_name: "Birth Certificate.pdf".to_string(),
        file_path: "uploads/birth-certificate.pdf".to_string(),
        file_size,
        mime_type: "application/pdf".to_string(),
        document_type: DocumentType::BirthCertificate,
        description: None,
    }
}

async fn storage_used(test: &TestSetup, academy_id: i32) -> i64 {
    AcademyRepository::new(&test.db)
        .find_by_id(academy_id)
        .await
        .unwrap()
        .unwrap()
        .storage_used
}

mod upload {
    use super::*;

    /// Expect the upload to be counted against the academy's storage
    #[tokio::test]
    async fn increments_storage_used() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
        let player = test.academy().insert_mock_player(academy.id, 1).await?;
        let service = DocumentService::new(&test.db);

        let document = service
            .upload(academy.id, new_document(Some(player.id), 2 * MIB))
            .await
            .unwrap();
        service
            .upload(academy.id, new_document(None, 3 * MIB))
            .await
            .unwrap();

        assert!(!document.is_verified);
        assert_eq!(document.player_id, Some(player.id));
        assert_eq!(storage_used(&test, academy.id).await, 5 * MIB);

        Ok(())
    }

    /// Expect an upload filling the quota exactly to pass and the next byte to fail
    #[tokio::test]
    async fn enforces_storage_quota() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 4 * MIB).await?;
        let service = DocumentService::new(&test.db);

        service
            .upload(academy.id, new_document(None, 4 * MIB))
            .await
            .unwrap();
        let result = service.upload(academy.id, new_document(None, 1)).await;

        match result {
            Err(Error::BillingError(BillingError::StorageQuotaExceeded {
                used,
                requested,
                limit,
                ..
            })) => {
                assert_eq!(used, 4 * MIB);
                assert_eq!(requested, 1);
                assert_eq!(limit, 4 * MIB);
            }
            other => panic!("expected StorageQuotaExceeded, got {:?}", other),
        }
        assert_eq!(storage_used(&test, academy.id).await, 4 * MIB);

        Ok(())
    }

    /// Expect concurrent uploads to never charge past the quota
    #[tokio::test]
    async fn concurrent_uploads_respect_quota() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 4 * MIB).await?;
        let first = DocumentService::new(&test.db);
        let second = DocumentService::new(&test.db);

        let (a, b) = tokio::join!(
            first.upload(academy.id, new_document(None, 3 * MIB)),
            second.upload(academy.id, new_document(None, 3 * MIB)),
        );

        assert!(a.is_ok() != b.is_ok());
        assert!([a, b].into_iter().any(|result| matches!(
            result,
            Err(Error::BillingError(BillingError::StorageQuotaExceeded { .. }))
        )));
        assert_eq!(storage_used(&test, academy.id).await, 3 * MIB);

        Ok(())
    }

    /// Expect empty files to be rejected before touching the database
    #[tokio::test]
    async fn rejects_empty_file() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;

        let result = DocumentService::new(&test.db)
            .upload(academy.id, new_document(None, 0))
            .await;

        assert!(matches!(
            result,
            Err(Error::DocumentError(DocumentError::InvalidFileSize(0)))
        ));

        Ok(())
    }

    /// Expect a document for another academy's player to be rejected
    #[tokio::test]
    async fn rejects_foreign_player() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
        let other = test.academy().insert_mock_academy(2).await?;
        let player = test.academy().insert_mock_player(other.id, 1).await?;

        let result = DocumentService::new(&test.db)
            .upload(academy.id, new_document(Some(player.id), MIB))
            .await;

        assert!(matches!(
            result,
            Err(Error::DocumentError(DocumentError::PlayerNotInAcademy { .. }))
        ));

        Ok(())
    }

    /// Expect uploads to require an active subscription
    #[tokio::test]
    async fn requires_subscription() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;

        let result = DocumentService::new(&test.db)
            .upload(academy.id, new_document(None, MIB))
            .await;

        assert!(matches!(
            result,
            Err(Error::BillingError(BillingError::NoActiveSubscription(_)))
        ));

        Ok(())
    }
}

mod delete {
    use super::*;

    /// Expect deletion to release the document's storage
    #[tokio::test]
    async fn releases_storage() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let (academy, _) = subscribed_academy(&test, 1, 10, 10 * MIB).await?;
        let service = DocumentService::new(&test.db);
        let document = service
            .upload(academy.id, new_document(None, 3 * MIB))
            .await
            .unwrap();

        let deleted = service.delete(academy.id, document.id).await.unwrap();

        assert_eq!(deleted.id, document.id);
        assert_eq!(storage_used(&test, academy.id).await, 0);

        Ok(())
    }

    /// Expect another academy's document to be reported missing
    #[tokio::test]
    async fn other_academy_is_not_found() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let other = test.academy().insert_mock_academy(2).await?;
        let document = test
            .academy()
            .insert_mock_document(other.id, None, MIB)
            .await?;

        let result = DocumentService::new(&test.db)
            .delete(academy.id, document.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::QueryError(QueryError::NotFound { model: "Document" }))
        ));

        Ok(())
    }
}

mod verify {
    use super::*;

    /// Expect a moderator to verify a document once
    #[tokio::test]
    async fn moderator_verifies_once() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let moderator = test
            .admin()
            .insert_mock_admin(1, AdminRole::Moderator)
            .await?;
        let document = test
            .academy()
            .insert_mock_document(academy.id, None, MIB)
            .await?;
        let service = DocumentService::new(&test.db);

        let verified = service.verify(moderator.id, document.id).await.unwrap();
        let again = service.verify(moderator.id, document.id).await;

        assert!(verified.is_verified);
        assert_eq!(verified.verified_by.as_deref(), Some("admin1@example.com"));
        assert!(matches!(
            again,
            Err(Error::DocumentError(DocumentError::AlreadyVerified(id))) if id == document.id
        ));

        Ok(())
    }

    /// Expect an inactive moderator to be refused
    #[tokio::test]
    async fn inactive_admin_is_refused() -> Result<(), TestError> {
        use academy::query::Delegates;
        use sea_orm::ActiveValue;

        let test = test_setup_with_academy_tables!()?;
        let academy = test.academy().insert_mock_academy(1).await?;
        let moderator = test
            .admin()
            .insert_mock_admin(1, AdminRole::Moderator)
            .await?;
        test.db
            .admin()
            .update(
                moderator.id,
                entity::admin::ActiveModel {
                    is_active: ActiveValue::Set(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let document = test
            .academy()
            .insert_mock_document(academy.id, None, MIB)
            .await?;

        let result = DocumentService::new(&test.db)
            .verify(moderator.id, document.id)
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::AccountInactive))
        ));

        Ok(())
    }
}
