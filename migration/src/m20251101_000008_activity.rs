use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_academy::Academy, m20251101_000007_admin::Admin};

static IDX_ACTIVITY_ACADEMY_ID_CREATED_AT: &str = "idx_activity_academy_id_created_at";
static IDX_ACTIVITY_ADMIN_ID: &str = "idx_activity_admin_id";
static FK_ACTIVITY_ACADEMY_ID: &str = "fk_activity_academy_id";
static FK_ACTIVITY_ADMIN_ID: &str = "fk_activity_admin_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(pk_auto(Activity::Id))
                    .col(integer_null(Activity::AcademyId))
                    .col(integer_null(Activity::AdminId))
                    .col(string(Activity::Action))
                    .col(text(Activity::Description))
                    .col(json_null(Activity::Metadata))
                    .col(string_null(Activity::IpAddress))
                    .col(text_null(Activity::UserAgent))
                    .col(timestamp(Activity::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ACTIVITY_ACADEMY_ID)
                            .from(Activity::Table, Activity::AcademyId)
                            .to(Academy::Table, Academy::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ACTIVITY_ADMIN_ID)
                            .from(Activity::Table, Activity::AdminId)
                            .to(Admin::Table, Admin::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACTIVITY_ACADEMY_ID_CREATED_AT)
                    .table(Activity::Table)
                    .col(Activity::AcademyId)
                    .col(Activity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACTIVITY_ADMIN_ID)
                    .table(Activity::Table)
                    .col(Activity::AdminId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Activity {
    Table,
    Id,
    AcademyId,
    AdminId,
    Action,
    Description,
    Metadata,
    IpAddress,
    UserAgent,
    CreatedAt,
}
