use academy::{
    error::{auth::AuthError, query::QueryError, Error},
    model::academy::NewAcademy,
    service::{academy::AcademyService, action, activity::ActivityService},
};
use entity::sea_orm_active_enums::AdminRole;

use super::*;

fn registration(n: i32) -> NewAcademy {
    NewAcademy {
        name: format!("Registered Academy {}", n),
        email: format!("registered{}@example.com", n),
        password: TEST_PASSWORD.to_string(),
        city: Some("Porto".to_string()),
        license_number: Some(format!("REG-{:04}", n)),
        ..Default::default()
    }
}

mod register {
    use super::*;

    /// Expect the registered academy to authenticate and never expose its password
    #[tokio::test]
    async fn registers_and_authenticates() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let service = AcademyService::new(&test.db);

        let academy = service.register(registration(1)).await.unwrap();
        let authenticated = service
            .authenticate("registered1@example.com", TEST_PASSWORD)
            .await
            .unwrap();
        let json = serde_json::to_value(&authenticated).unwrap();

        assert_eq!(authenticated.id, academy.id);
        assert!(academy.is_active);
        assert!(!academy.is_verified);
        assert!(json.get("password").is_none());

        Ok(())
    }

    /// Expect registration to be recorded in the audit log
    #[tokio::test]
    async fn records_activity() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;

        let academy = AcademyService::new(&test.db)
            .register(registration(1))
            .await
            .unwrap();
        let activity = ActivityService::new(&test.db)
            .recent_for_academy(academy.id, 10)
            .await
            .unwrap();

        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].action, action::ACADEMY_REGISTERED);

        Ok(())
    }

    /// Expect a taken email to fail without writing an audit entry
    #[tokio::test]
    async fn duplicate_email_is_rejected() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let service = AcademyService::new(&test.db);
        service.register(registration(1)).await.unwrap();

        let mut duplicate = registration(2);
        duplicate.email = "registered1@example.com".to_string();
        let result = service.register(duplicate).await;

        assert!(matches!(
            result,
            Err(Error::QueryError(QueryError::UniqueConstraint(_)))
        ));

        Ok(())
    }
}

mod authenticate {
    use super::*;

    /// Expect unknown emails and wrong passwords to be indistinguishable
    #[tokio::test]
    async fn rejects_invalid_credentials() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let service = AcademyService::new(&test.db);
        service.register(registration(1)).await.unwrap();

        let wrong_password = service
            .authenticate("registered1@example.com", "wrong password")
            .await;
        let unknown_email = service
            .authenticate("nobody@example.com", TEST_PASSWORD)
            .await;

        assert!(matches!(
            wrong_password,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            unknown_email,
            Err(Error::AuthError(AuthError::InvalidCredentials))
        ));

        Ok(())
    }

    /// Expect a deactivated academy to be refused after a correct password
    #[tokio::test]
    async fn rejects_inactive_academy() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let admin = test.admin().insert_mock_admin(1, AdminRole::Admin).await?;
        let service = AcademyService::new(&test.db);
        let academy = service.register(registration(1)).await.unwrap();

        let deactivated = service.set_active(admin.id, academy.id, false).await.unwrap();
        let result = service
            .authenticate("registered1@example.com", TEST_PASSWORD)
            .await;

        assert!(!deactivated.is_active);
        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::AccountInactive))
        ));

        Ok(())
    }
}

/// Expect the new password to replace the old one only with the correct current password
#[tokio::test]
async fn change_password() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = AcademyService::new(&test.db);
    let academy = service.register(registration(1)).await.unwrap();

    let wrong_current = service
        .change_password(academy.id, "not it", "new secret phrase")
        .await;
    service
        .change_password(academy.id, TEST_PASSWORD, "new secret phrase")
        .await
        .unwrap();
    let old = service
        .authenticate("registered1@example.com", TEST_PASSWORD)
        .await;
    let new = service
        .authenticate("registered1@example.com", "new secret phrase")
        .await;

    assert!(matches!(
        wrong_current,
        Err(Error::AuthError(AuthError::InvalidCredentials))
    ));
    assert!(old.is_err());
    assert!(new.is_ok());

    Ok(())
}

mod moderation {
    use super::*;

    /// Expect a moderator to be refused academy status changes
    #[tokio::test]
    async fn set_active_requires_admin() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let moderator = test
            .admin()
            .insert_mock_admin(1, AdminRole::Moderator)
            .await?;
        let academy = test.academy().insert_mock_academy(1).await?;

        let result = AcademyService::new(&test.db)
            .set_active(moderator.id, academy.id, false)
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InsufficientRole {
                required: AdminRole::Admin,
                actual: AdminRole::Moderator,
            }))
        ));

        Ok(())
    }

    /// Expect verification to mark the academy and record the verifying admin
    #[tokio::test]
    async fn verify_records_admin() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let admin = test
            .admin()
            .insert_mock_admin(1, AdminRole::SuperAdmin)
            .await?;
        let academy = test.academy().insert_mock_academy(1).await?;

        let verified = AcademyService::new(&test.db)
            .verify(admin.id, academy.id)
            .await
            .unwrap();
        let activity = ActivityService::new(&test.db)
            .recent_for_academy(academy.id, 1)
            .await
            .unwrap();

        assert!(verified.is_verified);
        assert_eq!(activity[0].action, action::ACADEMY_VERIFIED);
        assert_eq!(activity[0].admin_id, Some(admin.id));
        assert_eq!(
            activity[0].metadata,
            Some(serde_json::json!({ "verified_by": "admin1@example.com" }))
        );

        Ok(())
    }

    /// Expect NotFound for an unknown academy
    #[tokio::test]
    async fn verify_unknown_academy() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let admin = test.admin().insert_mock_admin(1, AdminRole::Admin).await?;

        let result = AcademyService::new(&test.db).verify(admin.id, 404).await;

        assert!(result.is_err_and(|err| err.is_not_found()));

        Ok(())
    }
}
