use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemSetting::Table)
                    .if_not_exists()
                    .col(pk_auto(SystemSetting::Id))
                    .col(string_uniq(SystemSetting::Key))
                    .col(text(SystemSetting::Value))
                    .col(text_null(SystemSetting::Description))
                    .col(boolean(SystemSetting::IsPublic).default(false))
                    .col(timestamp(SystemSetting::CreatedAt))
                    .col(timestamp(SystemSetting::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSetting::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SystemSetting {
    Table,
    Id,
    Key,
    Value,
    Description,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
