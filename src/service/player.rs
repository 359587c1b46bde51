use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        academy::AcademyRepository, activity::ActivityRepository, player::PlayerRepository,
        subscription::SubscriptionRepository,
    },
    error::{billing::BillingError, query::QueryError, Error},
    model::{activity::NewActivity, player::NewPlayer},
    service::action,
};

pub struct PlayerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerService<'a> {
    /// Creates a new instance of [`PlayerService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls a player in the academy within its plan's player limit
    ///
    /// Only active players count towards the limit.
    ///
    /// # Returns
    /// - `Ok(Model)`: the enrolled player
    /// - `Err(QueryError::NotFound)`: unknown academy
    /// - `Err(BillingError::NoActiveSubscription)`: the academy has no current subscription
    /// - `Err(BillingError::PlayerLimitReached)`: the plan's `max_players` active players are enrolled
    pub async fn enroll(
        &self,
        academy_id: i32,
        player: NewPlayer,
    ) -> Result<entity::player::Model, Error> {
        let txn = self.db.begin().await?;

        // Held until commit so concurrent enrollments count players one at a time
        AcademyRepository::new(&txn)
            .find_by_id_for_update(academy_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Academy" })?;

        let (_, plan) = SubscriptionRepository::new(&txn)
            .find_active_with_plan(academy_id, Utc::now().naive_utc())
            .await?
            .ok_or(BillingError::NoActiveSubscription(academy_id))?;

        let player_repository = PlayerRepository::new(&txn);

        let active_players = player_repository.count_active(academy_id).await?;
        if active_players >= plan.max_players.max(0) as u64 {
            return Err(BillingError::PlayerLimitReached {
                academy_id,
                limit: plan.max_players,
            }
            .into());
        }

        let player = player_repository.create(academy_id, player).await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::PLAYER_ENROLLED,
                    format!("Player {} {} enrolled", player.first_name, player.last_name),
                )
                .academy(academy_id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(academy_id, player_id = player.id, "enrolled player");

        Ok(player)
    }

    /// Deactivates a player, freeing a slot of the plan's player limit
    pub async fn deactivate(
        &self,
        academy_id: i32,
        player_id: i32,
    ) -> Result<entity::player::Model, Error> {
        let txn = self.db.begin().await?;

        let player_repository = PlayerRepository::new(&txn);

        player_repository
            .find_in_academy(academy_id, player_id)
            .await?
            .ok_or(QueryError::NotFound { model: "Player" })?;

        let player = player_repository.set_active(player_id, false).await?;

        ActivityRepository::new(&txn)
            .append(
                NewActivity::new(
                    action::PLAYER_DEACTIVATED,
                    format!(
                        "Player {} {} deactivated",
                        player.first_name, player.last_name
                    ),
                )
                .academy(academy_id),
            )
            .await?;

        txn.commit().await?;

        Ok(player)
    }

    /// Lists the academy's players ordered by name
    ///
    /// # Arguments
    /// - `active_only`: skip deactivated players
    /// - `cursor`: ID of the first player of the page (inclusive)
    /// - `take`: page size, negative to page backwards from the cursor
    pub async fn list_for_academy(
        &self,
        academy_id: i32,
        active_only: bool,
        cursor: Option<i32>,
        take: Option<i64>,
    ) -> Result<Vec<entity::player::Model>, Error> {
        PlayerRepository::new(self.db)
            .list_for_academy(academy_id, active_only, cursor, take)
            .await
    }
}
