use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, ColumnTrait, Condition, ConnectionTrait, IdenStatic};

use crate::{
    error::Error,
    model::document::NewDocument,
    query::{AggregateArgs, Delegates, FindArgs, SortOrder},
};

pub struct DocumentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        academy_id: i32,
        document: NewDocument,
    ) -> Result<entity::document::Model, Error> {
        self.db
            .document()
            .create(entity::document::ActiveModel {
                academy_id: ActiveValue::Set(academy_id),
                player_id: ActiveValue::Set(document.player_id),
                file_name: ActiveValue::Set(document.file_name),
                original_name: ActiveValue::Set(document.original_name),
                file_path: ActiveValue::Set(document.file_path),
                file_size: ActiveValue::Set(document.file_size),
                mime_type: ActiveValue::Set(document.mime_type),
                document_type: ActiveValue::Set(document.document_type),
                description: ActiveValue::Set(document.description),
                is_verified: ActiveValue::Set(false),
                verified_at: ActiveValue::Set(None),
                verified_by: ActiveValue::Set(None),
                ..Default::default()
            })
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::document::Model>, Error> {
        self.db.document().find_unique(id).await
    }

    pub async fn list_for_player(
        &self,
        player_id: i32,
    ) -> Result<Vec<entity::document::Model>, Error> {
        use entity::document::Column;

        self.db
            .document()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::PlayerId.eq(player_id)))
                    .order_by(Column::CreatedAt, SortOrder::Desc),
            )
            .await
    }

    /// Documents waiting for verification, oldest first
    pub async fn list_unverified(
        &self,
        take: i64,
    ) -> Result<Vec<entity::document::Model>, Error> {
        use entity::document::Column;

        self.db
            .document()
            .find_many(
                FindArgs::new()
                    .filter(Condition::all().add(Column::IsVerified.eq(false)))
                    .order_by(Column::CreatedAt, SortOrder::Asc)
                    .take(take),
            )
            .await
    }

    /// Total bytes of the academy's documents, used to reconcile `storage_used`
    pub async fn total_size_for_academy(&self, academy_id: i32) -> Result<i64, Error> {
        use entity::document::Column;

        let result = self
            .db
            .document()
            .aggregate(
                AggregateArgs::new()
                    .filter(Condition::all().add(Column::AcademyId.eq(academy_id)))
                    .sum(Column::FileSize),
            )
            .await?;

        Ok(result
            .sum_of(Column::FileSize.as_str())
            .map(|total| total as i64)
            .unwrap_or(0))
    }

    pub async fn mark_verified(
        &self,
        id: i32,
        verified_by: String,
        verified_at: NaiveDateTime,
    ) -> Result<entity::document::Model, Error> {
        self.db
            .document()
            .update(
                id,
                entity::document::ActiveModel {
                    is_verified: ActiveValue::Set(true),
                    verified_at: ActiveValue::Set(Some(verified_at)),
                    verified_by: ActiveValue::Set(Some(verified_by)),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<entity::document::Model, Error> {
        self.db.document().delete(id).await
    }
}
