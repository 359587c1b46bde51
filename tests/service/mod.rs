mod academies;
mod admin;
mod document;
mod player;
mod setting;
mod subscription;

use academy_test_utils::prelude::*;

/// Seed an academy with an ACTIVE subscription to a fresh plan.
///
/// Returns the academy and plan models.
async fn subscribed_academy(
    test: &TestSetup,
    n: i32,
    max_players: i32,
    max_storage: i64,
) -> Result<(entity::academy::Model, entity::subscription_plan::Model), TestError> {
    let academy = test.academy().insert_mock_academy(n).await?;
    let plan = test
        .billing()
        .insert_mock_plan(n, max_players, max_storage)
        .await?;
    test.billing()
        .insert_active_subscription(academy.id, plan.id)
        .await?;

    Ok((academy, plan))
}
