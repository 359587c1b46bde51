use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub academy_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub nationality: String,
    pub position: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub preferred_foot: Option<String>,
    pub current_club: Option<String>,
    pub training_start_date: Option<Date>,
    pub training_end_date: Option<Date>,
    pub is_active: bool,
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
    #[sea_orm(has_many = "super::document::Entity")]
    Document,
}

impl Related<super::academy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Academy.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
