use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_academy::Academy, m20251101_000004_player::Player};

static IDX_DOCUMENT_ACADEMY_ID: &str = "idx_document_academy_id";
static IDX_DOCUMENT_PLAYER_ID: &str = "idx_document_player_id";
static FK_DOCUMENT_ACADEMY_ID: &str = "fk_document_academy_id";
static FK_DOCUMENT_PLAYER_ID: &str = "fk_document_player_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(pk_auto(Document::Id))
                    .col(integer(Document::AcademyId))
                    .col(integer_null(Document::PlayerId))
                    .col(string(Document::FileName))
                    .col(string(Document::OriginalName))
                    .col(string(Document::FilePath))
                    .col(big_integer(Document::FileSize))
                    .col(string(Document::MimeType))
                    .col(string_len(Document::DocumentType, 32))
                    .col(text_null(Document::Description))
                    .col(boolean(Document::IsVerified).default(false))
                    .col(timestamp_null(Document::VerifiedAt))
                    .col(string_null(Document::VerifiedBy))
                    .col(timestamp(Document::CreatedAt))
                    .col(timestamp(Document::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DOCUMENT_ACADEMY_ID)
                            .from(Document::Table, Document::AcademyId)
                            .to(Academy::Table, Academy::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DOCUMENT_PLAYER_ID)
                            .from(Document::Table, Document::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOCUMENT_ACADEMY_ID)
                    .table(Document::Table)
                    .col(Document::AcademyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOCUMENT_PLAYER_ID)
                    .table(Document::Table)
                    .col(Document::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    AcademyId,
    PlayerId,
    FileName,
    OriginalName,
    FilePath,
    FileSize,
    MimeType,
    DocumentType,
    Description,
    IsVerified,
    VerifiedAt,
    VerifiedBy,
    CreatedAt,
    UpdatedAt,
}
