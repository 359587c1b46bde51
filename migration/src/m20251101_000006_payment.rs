use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_academy::Academy, m20251101_000003_subscription::Subscription};

static IDX_PAYMENT_ACADEMY_ID: &str = "idx_payment_academy_id";
static IDX_PAYMENT_SUBSCRIPTION_ID: &str = "idx_payment_subscription_id";
static FK_PAYMENT_ACADEMY_ID: &str = "fk_payment_academy_id";
static FK_PAYMENT_SUBSCRIPTION_ID: &str = "fk_payment_subscription_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::AcademyId))
                    .col(integer(Payment::SubscriptionId))
                    .col(decimal_len(Payment::Amount, 10, 2))
                    .col(string_len(Payment::Currency, 3))
                    .col(string_len(Payment::Status, 20))
                    .col(string(Payment::PaymentMethod))
                    .col(string_null(Payment::TransactionId).unique_key())
                    .col(timestamp_null(Payment::PaymentDate))
                    .col(timestamp(Payment::CreatedAt))
                    .col(timestamp(Payment::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PAYMENT_ACADEMY_ID)
                            .from(Payment::Table, Payment::AcademyId)
                            .to(Academy::Table, Academy::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PAYMENT_SUBSCRIPTION_ID)
                            .from(Payment::Table, Payment::SubscriptionId)
                            .to(Subscription::Table, Subscription::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_ACADEMY_ID)
                    .table(Payment::Table)
                    .col(Payment::AcademyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_SUBSCRIPTION_ID)
                    .table(Payment::Table)
                    .col(Payment::SubscriptionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    AcademyId,
    SubscriptionId,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    TransactionId,
    PaymentDate,
    CreatedAt,
    UpdatedAt,
}
