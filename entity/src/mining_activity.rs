use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mining_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub type_id: i64,
    pub quantity: i64,
    pub miner_id: i64,
    pub refinery_id: i64,
    pub processed: bool,
    pub processed_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
