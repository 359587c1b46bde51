use sea_orm_migration::{prelude::*, schema::*};

static IDX_ACADEMY_IS_ACTIVE: &str = "idx_academy_is_active";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Academy::Table)
                    .if_not_exists()
                    .col(pk_auto(Academy::Id))
                    .col(string(Academy::Name))
                    .col(string_uniq(Academy::Email))
                    .col(string(Academy::Password))
                    .col(string_null(Academy::Phone))
                    .col(text_null(Academy::Address))
                    .col(string_null(Academy::City))
                    .col(string_null(Academy::Country))
                    .col(string_null(Academy::Website))
                    .col(string_null(Academy::LogoUrl))
                    .col(string_null(Academy::LicenseNumber).unique_key())
                    .col(timestamp_null(Academy::LicenseExpiresAt))
                    .col(boolean(Academy::IsActive).default(true))
                    .col(boolean(Academy::IsVerified).default(false))
                    .col(big_integer(Academy::StorageUsed).default(0))
                    .col(timestamp(Academy::CreatedAt))
                    .col(timestamp(Academy::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACADEMY_IS_ACTIVE)
                    .table(Academy::Table)
                    .col(Academy::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Academy::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Academy {
    Table,
    Id,
    Name,
    Email,
    Password,
    Phone,
    Address,
    City,
    Country,
    Website,
    LogoUrl,
    LicenseNumber,
    LicenseExpiresAt,
    IsActive,
    IsVerified,
    StorageUsed,
    CreatedAt,
    UpdatedAt,
}
