use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

pub struct SolarSystemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SolarSystemRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert(
        &self,
        solar_system_id: i64,
        name: &str,
    ) -> Result<entity::solar_system::Model, DbErr> {
        let solar_system = entity::solar_system::ActiveModel {
            solar_system_id: ActiveValue::Set(solar_system_id),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };

        entity::prelude::SolarSystem::insert(solar_system)
            .on_conflict(
                OnConflict::column(entity::solar_system::Column::SolarSystemId)
                    .update_column(entity::solar_system::Column::Name)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_solar_system_id(
        &self,
        solar_system_id: i64,
    ) -> Result<Option<entity::solar_system::Model>, DbErr> {
        entity::prelude::SolarSystem::find()
            .filter(entity::solar_system::Column::SolarSystemId.eq(solar_system_id))
            .one(self.db)
            .await
    }
}
