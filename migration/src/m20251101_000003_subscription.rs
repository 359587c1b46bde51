use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_academy::Academy, m20251101_000002_subscription_plan::SubscriptionPlan,
};

static IDX_SUBSCRIPTION_ACADEMY_ID: &str = "idx_subscription_academy_id";
static IDX_SUBSCRIPTION_STATUS_END_DATE: &str = "idx_subscription_status_end_date";
static FK_SUBSCRIPTION_ACADEMY_ID: &str = "fk_subscription_academy_id";
static FK_SUBSCRIPTION_PLAN_ID: &str = "fk_subscription_plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscription::Id))
                    .col(integer(Subscription::AcademyId))
                    .col(integer(Subscription::PlanId))
                    .col(string_len(Subscription::Status, 20))
                    .col(timestamp(Subscription::StartDate))
                    .col(timestamp(Subscription::EndDate))
                    .col(boolean(Subscription::AutoRenew).default(false))
                    .col(timestamp(Subscription::CreatedAt))
                    .col(timestamp(Subscription::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_ACADEMY_ID)
                            .from(Subscription::Table, Subscription::AcademyId)
                            .to(Academy::Table, Academy::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_SUBSCRIPTION_PLAN_ID)
                            .from(Subscription::Table, Subscription::PlanId)
                            .to(SubscriptionPlan::Table, SubscriptionPlan::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBSCRIPTION_ACADEMY_ID)
                    .table(Subscription::Table)
                    .col(Subscription::AcademyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SUBSCRIPTION_STATUS_END_DATE)
                    .table(Subscription::Table)
                    .col(Subscription::Status)
                    .col(Subscription::EndDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subscription {
    Table,
    Id,
    AcademyId,
    PlanId,
    Status,
    StartDate,
    EndDate,
    AutoRenew,
    CreatedAt,
    UpdatedAt,
}
