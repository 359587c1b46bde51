use academy::{
    error::{auth::AuthError, query::QueryError, Error},
    model::admin::NewAdmin,
    service::admin::AdminService,
};
use entity::sea_orm_active_enums::AdminRole;

use super::*;

fn new_admin(role: AdminRole) -> NewAdmin {
    NewAdmin {
        email: "ops@example.com".to_string(),
        password: TEST_PASSWORD.to_string(),
        name: "Operations".to_string(),
        role,
    }
}

/// Expect a created admin to log in and have the login time recorded
#[tokio::test]
async fn create_and_authenticate() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = AdminService::new(&test.db);

    let created = service.create_admin(new_admin(AdminRole::Admin)).await.unwrap();
    let logged_in = service
        .authenticate("ops@example.com", TEST_PASSWORD)
        .await
        .unwrap();
    let json = serde_json::to_value(&logged_in).unwrap();

    assert!(created.last_login_at.is_none());
    assert!(logged_in.last_login_at.is_some());
    assert_eq!(logged_in.role, "ADMIN");
    assert!(json.get("password").is_none());

    Ok(())
}

/// Expect a wrong password to be rejected
#[tokio::test]
async fn wrong_password_is_rejected() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = AdminService::new(&test.db);
    service.create_admin(new_admin(AdminRole::Moderator)).await.unwrap();

    let result = service.authenticate("ops@example.com", "guess").await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Expect the email to be unique across admins
#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let service = AdminService::new(&test.db);
    service.create_admin(new_admin(AdminRole::Admin)).await.unwrap();

    let result = service.create_admin(new_admin(AdminRole::SuperAdmin)).await;

    assert!(matches!(
        result,
        Err(Error::QueryError(QueryError::UniqueConstraint(_)))
    ));

    Ok(())
}

mod require_role {
    use super::*;

    /// Expect higher roles to satisfy lower requirements
    #[tokio::test]
    async fn accepts_sufficient_role() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;
        let admin = test.admin().insert_mock_admin(1, AdminRole::SuperAdmin).await?;

        let result = AdminService::new(&test.db)
            .require_role(admin.id, AdminRole::Moderator)
            .await;

        assert_eq!(result.unwrap().id, admin.id);

        Ok(())
    }

    /// Expect an inactive admin to be refused regardless of role
    #[tokio::test]
    async fn rejects_inactive_admin() -> Result<(), TestError> {
        use academy::query::Delegates;
        use sea_orm::ActiveValue;

        let test = test_setup_with_academy_tables!()?;
        let admin = test.admin().insert_mock_admin(1, AdminRole::SuperAdmin).await?;
        test.db
            .admin()
            .update(
                admin.id,
                entity::admin::ActiveModel {
                    is_active: ActiveValue::Set(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = AdminService::new(&test.db)
            .require_role(admin.id, AdminRole::Moderator)
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::AccountInactive))
        ));

        Ok(())
    }

    /// Expect NotFound for an unknown admin
    #[tokio::test]
    async fn rejects_unknown_admin() -> Result<(), TestError> {
        let test = test_setup_with_academy_tables!()?;

        let result = AdminService::new(&test.db)
            .require_role(1, AdminRole::Moderator)
            .await;

        assert!(matches!(
            result,
            Err(Error::QueryError(QueryError::NotFound { model: "Admin" }))
        ));

        Ok(())
    }
}
