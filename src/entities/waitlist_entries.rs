use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "waitlist_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub house_id: Uuid,
    pub ceremony_id: Uuid,
    pub user_id: Uuid,
    pub position: i32,
    pub notified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ceremonies::Entity",
        from = "Column::CeremonyId",
        to = "super::ceremonies::Column::Id"
    )]
    Ceremony,
}

impl Related<super::ceremonies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ceremony.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
