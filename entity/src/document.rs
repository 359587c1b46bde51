use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::DocumentType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub academy_id: i32,
    pub player_id: Option<i32>,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    /// Size in bytes
    pub file_size: i64,
    pub mime_type: String,
    pub document_type: DocumentType,
    pub description: Option<String>,
    pub is_verified: bool,
    pub verified_at: Option<DateTime>,
    pub verified_by: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academy::Entity",
        from = "Column::AcademyId",
        to = "super::academy::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Academy,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Player,
}

impl Related<super::academy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Academy.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
