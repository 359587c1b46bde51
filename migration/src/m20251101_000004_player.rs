use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_academy::Academy;

static IDX_PLAYER_ACADEMY_ID: &str = "idx_player_academy_id";
static FK_PLAYER_ACADEMY_ID: &str = "fk_player_academy_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(pk_auto(Player::Id))
                    .col(integer(Player::AcademyId))
                    .col(string(Player::FirstName))
                    .col(string(Player::LastName))
                    .col(date(Player::DateOfBirth))
                    .col(string(Player::Nationality))
                    .col(string_null(Player::Position))
                    .col(double_null(Player::Height))
                    .col(double_null(Player::Weight))
                    .col(string_null(Player::PreferredFoot))
                    .col(string_null(Player::CurrentClub))
                    .col(date_null(Player::TrainingStartDate))
                    .col(date_null(Player::TrainingEndDate))
                    .col(boolean(Player::IsActive).default(true))
                    .col(timestamp(Player::CreatedAt))
                    .col(timestamp(Player::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PLAYER_ACADEMY_ID)
                            .from(Player::Table, Player::AcademyId)
                            .to(Academy::Table, Academy::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLAYER_ACADEMY_ID)
                    .table(Player::Table)
                    .col(Player::AcademyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Player {
    Table,
    Id,
    AcademyId,
    FirstName,
    LastName,
    DateOfBirth,
    Nationality,
    Position,
    Height,
    Weight,
    PreferredFoot,
    CurrentClub,
    TrainingStartDate,
    TrainingEndDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
