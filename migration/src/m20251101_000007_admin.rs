use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string_uniq(Admin::Email))
                    .col(string(Admin::Password))
                    .col(string(Admin::Name))
                    .col(string_len(Admin::Role, 20))
                    .col(boolean(Admin::IsActive).default(true))
                    .col(timestamp_null(Admin::LastLoginAt))
                    .col(timestamp(Admin::CreatedAt))
                    .col(timestamp(Admin::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Admin {
    Table,
    Id,
    Email,
    Password,
    Name,
    Role,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
