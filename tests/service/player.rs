use academy::{
    error::{billing::BillingError, Error},
    model::player::NewPlayer,
    service::player::PlayerService,
};
use chrono::NaiveDate;

use super::*;

fn new_player(n: i32) -> NewPlayer {
    NewPlayer {
        first_name: "Junior".to_string(),
        last_name: format!("Player {}", n),
        date_of_birth: NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(),
        nationality: "Portugal".to_string(),
        position: Some("Forward".to_string()),
        ..Default::default()
    }
}

/// Expect enrollment to require an active subscription
#[tokio::test]
async fn enroll_requires_subscription() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;

    let result = PlayerService::new(&test.db)
        .enroll(academy.id, new_player(1))
        .await;

    assert!(matches!(
        result,
        Err(Error::BillingError(BillingError::NoActiveSubscription(id))) if id == academy.id
    ));

    Ok(())
}

/// Expect enrollment to stop at the plan's player limit
#[tokio::test]
async fn enroll_respects_player_limit() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, _) = subscribed_academy(&test, 1, 2, 10 * MIB).await?;
    let service = PlayerService::new(&test.db);

    service.enroll(academy.id, new_player(1)).await.unwrap();
    service.enroll(academy.id, new_player(2)).await.unwrap();
    let result = service.enroll(academy.id, new_player(3)).await;

    assert!(matches!(
        result,
        Err(Error::BillingError(BillingError::PlayerLimitReached { limit: 2, .. }))
    ));

    Ok(())
}

/// Expect concurrent enrollments to fill the last slot only once
#[tokio::test]
async fn concurrent_enrollments_respect_limit() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, _) = subscribed_academy(&test, 1, 1, 10 * MIB).await?;
    let first = PlayerService::new(&test.db);
    let second = PlayerService::new(&test.db);

    let (a, b) = tokio::join!(
        first.enroll(academy.id, new_player(1)),
        second.enroll(academy.id, new_player(2)),
    );
    let active = first
        .list_for_academy(academy.id, true, None, None)
        .await
        .unwrap();

    assert!(a.is_ok() != b.is_ok());
    assert_eq!(active.len(), 1);

    Ok(())
}

/// Expect NotFound when enrolling into an unknown academy
#[tokio::test]
async fn enroll_unknown_academy() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;

    let result = PlayerService::new(&test.db)
        .enroll(42, new_player(1))
        .await;

    assert!(result.is_err_and(|err| err.is_not_found()));

    Ok(())
}

/// Expect a deactivated player to free a slot
#[tokio::test]
async fn deactivation_frees_slot() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let (academy, _) = subscribed_academy(&test, 1, 1, 10 * MIB).await?;
    let service = PlayerService::new(&test.db);

    let first = service.enroll(academy.id, new_player(1)).await.unwrap();
    service.deactivate(academy.id, first.id).await.unwrap();
    let second = service.enroll(academy.id, new_player(2)).await;
    let active = service
        .list_for_academy(academy.id, true, None, None)
        .await
        .unwrap();

    assert!(second.is_ok());
    assert_eq!(active.len(), 1);

    Ok(())
}

/// Expect another academy's player to be reported missing
#[tokio::test]
async fn deactivate_other_academy_player() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let other = test.academy().insert_mock_academy(2).await?;
    let player = test.academy().insert_mock_player(other.id, 1).await?;

    let result = PlayerService::new(&test.db)
        .deactivate(academy.id, player.id)
        .await;

    assert!(result.is_err_and(|err| err.is_not_found()));

    Ok(())
}
