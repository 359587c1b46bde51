use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait};

use crate::{
    error::Error,
    model::player::NewPlayer,
    query::{Delegates, FindArgs, SortOrder},
};

pub struct PlayerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PlayerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        academy_id: i32,
        player: NewPlayer,
    ) -> Result<entity::player::Model, Error> {
        self.db
            .player()
            .create(entity::player::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                first_name: ActiveValue::Set(player.first_name),
                last_name: ActiveValue::Set(player.last_name),
                date_of_birth: ActiveValue::Set(player.date_of_birth),
                nationality: ActiveValue::Set(player.nationality),
                position: ActiveValue::Set(player.position),
                height: ActiveValue::Set(player.height),
                weight: ActiveValue::Set(player.weight),
                preferred_foot: ActiveValue::Set(player.preferred_foot),
                current_club: ActiveValue::Set(player.current_club),
                training_start_date: ActiveValue::Set(player.training_start_date),
                training_end_date: ActiveValue::Set(player.training_end_date),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            })
            .await
    }

    /// Finds a player only if it belongs to the given academy
    pub async fn find_in_academy(
        &self,
        academy_id: i32,
        player_id: i32,
    ) -> Result<Option<entity::player::Model>, Error> {
        use entity::player::Column;

        self.db
            .player()
            .find_first(
                FindArgs::new().filter(
                    Condition::all()
                        .add(Column::Id.eq(player_id))
                        .add(Column::AcademyId.eq(academy_id)),
                ),
            )
            .await
    }

    pub async fn count_active(&self, academy_id: i32) -> Result<u64, Error> {
        use entity::player::Column;

        self.db
            .player()
            .count(
                FindArgs::new().filter(
                    Condition::all()
                        .add(Column::AcademyId.eq(academy_id))
                        .add(Column::IsActive.eq(true)),
                ),
            )
            .await
    }

    /// Lists the academy's players by last name, then first name.
    ///
    /// # Arguments
    /// - `active_only`: skip deactivated players
    /// - `cursor`: ID of the first player of the page (inclusive)
    /// - `take`: page size
    pub async fn list_for_academy(
        &self,
        academy_id: i32,
        active_only: bool,
        cursor: Option<i32>,
        take: Option<i64>,
    ) -> Result<Vec<entity::player::Model>, Error> {
        use entity::player::Column;

        let mut condition = Condition::all().add(Column::AcademyId.eq(academy_id));
        if active_only {
            condition = condition.add(Column::IsActive.eq(true));
        }

        let mut args = FindArgs::<entity::player::Entity>::new()
            .filter(condition)
            .order_by(Column::LastName, SortOrder::Asc)
            .order_by(Column::FirstName, SortOrder::Asc);
        if let Some(cursor) = cursor {
            args = args.cursor(cursor);
        }
        if let Some(take) = take {
            args = args.take(take);
        }

        self.db.player().find_many(args).await
    }

    pub async fn set_active(
        &self,
        player_id: i32,
        is_active: bool,
    ) -> Result<entity::player::Model, Error> {
        self.db
            .player()
            .update(
                player_id,
                entity::player::ActiveModel {
                    is_active: ActiveValue::Set(is_active),
                    ..Default::default()
                },
            )
            .await
    }
}
