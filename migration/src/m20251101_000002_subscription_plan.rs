use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(SubscriptionPlan::Id))
                    .col(string_uniq(SubscriptionPlan::Name))
                    .col(text_null(SubscriptionPlan::Description))
                    .col(decimal_len(SubscriptionPlan::Price, 10, 2))
                    .col(string_len(SubscriptionPlan::Currency, 3))
                    .col(integer(SubscriptionPlan::MaxPlayers))
                    .col(big_integer(SubscriptionPlan::MaxStorage))
                    .col(integer(SubscriptionPlan::DurationDays).default(30))
                    .col(json(SubscriptionPlan::Features))
                    .col(boolean(SubscriptionPlan::IsActive).default(true))
                    .col(timestamp(SubscriptionPlan::CreatedAt))
                    .col(timestamp(SubscriptionPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SubscriptionPlan {
    Table,
    Id,
    Name,
    Description,
    Price,
    Currency,
    MaxPlayers,
    MaxStorage,
    DurationDays,
    Features,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
