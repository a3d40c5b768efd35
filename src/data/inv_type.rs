use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::esi::model::TypeInfo;

pub struct InvTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvTypeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates or refreshes the display metadata for a type
    pub async fn upsert(
        &self,
        type_id: i64,
        type_info: TypeInfo,
    ) -> Result<entity::inv_type::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let inv_type = entity::inv_type::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            group_id: ActiveValue::Set(type_info.group_id),
            name: ActiveValue::Set(type_info.name),
            description: ActiveValue::Set(type_info.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::InvType::insert(inv_type)
            .on_conflict(
                OnConflict::column(entity::inv_type::Column::TypeId)
                    .update_columns([
                        entity::inv_type::Column::GroupId,
                        entity::inv_type::Column::Name,
                        entity::inv_type::Column::Description,
                        entity::inv_type::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_type_id(
        &self,
        type_id: i64,
    ) -> Result<Option<entity::inv_type::Model>, DbErr> {
        entity::prelude::InvType::find()
            .filter(entity::inv_type::Column::TypeId.eq(type_id))
            .one(self.db)
            .await
    }
}
