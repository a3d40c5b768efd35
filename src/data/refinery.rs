use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

const ID_LOOKUP_BATCH_SIZE: usize = 1000;

pub struct RefineryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RefineryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        observer_id: i64,
        name: &str,
        solar_system_id: i64,
    ) -> Result<entity::refinery::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let refinery = entity::refinery::ActiveModel {
            observer_id: ActiveValue::Set(observer_id),
            name: ActiveValue::Set(name.to_string()),
            solar_system_id: ActiveValue::Set(solar_system_id),
            income: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        refinery.insert(self.db).await
    }

    pub async fn get_by_observer_id(
        &self,
        observer_id: i64,
    ) -> Result<Option<entity::refinery::Model>, DbErr> {
        entity::prelude::Refinery::find()
            .filter(entity::refinery::Column::ObserverId.eq(observer_id))
            .one(self.db)
            .await
    }

    /// Returns which of the provided observer IDs have a refinery row, looked up in batches
    pub async fn get_existing_observer_ids(
        &self,
        observer_ids: &[i64],
    ) -> Result<HashSet<i64>, DbErr> {
        let mut existing = HashSet::new();

        for batch in observer_ids.chunks(ID_LOOKUP_BATCH_SIZE) {
            let found = entity::prelude::Refinery::find()
                .select_only()
                .column(entity::refinery::Column::ObserverId)
                .filter(entity::refinery::Column::ObserverId.is_in(batch.iter().copied()))
                .into_tuple::<i64>()
                .all(self.db)
                .await?;

            existing.extend(found);
        }

        Ok(existing)
    }

    /// Atomically adds `amount` to a refinery's income
    ///
    /// # Returns
    /// - `Ok(true)` - Income updated
    /// - `Ok(false)` - No refinery with the observer ID exists
    pub async fn add_income(&self, observer_id: i64, amount: f64) -> Result<bool, DbErr> {
        let result = entity::prelude::Refinery::update_many()
            .col_expr(
                entity::refinery::Column::Income,
                Expr::col(entity::refinery::Column::Income).add(amount),
            )
            .col_expr(
                entity::refinery::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::refinery::Column::ObserverId.eq(observer_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// All refineries, highest income first
    pub async fn get_all_by_income(&self) -> Result<Vec<entity::refinery::Model>, DbErr> {
        entity::prelude::Refinery::find()
            .order_by_desc(entity::refinery::Column::Income)
            .order_by_asc(entity::refinery::Column::ObserverId)
            .all(self.db)
            .await
    }

    pub async fn get_total_income(&self) -> Result<f64, DbErr> {
        let total = entity::prelude::Refinery::find()
            .select_only()
            .column_as(entity::refinery::Column::Income.sum(), "total")
            .into_tuple::<Option<f64>>()
            .one(self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    /// Solar system whose refineries have generated the most income
    ///
    /// # Returns
    /// - `Some((solar_system_id, total_income))` - Top solar system
    /// - `None` - No refineries exist
    pub async fn get_top_solar_system(&self) -> Result<Option<(i64, f64)>, DbErr> {
        entity::prelude::Refinery::find()
            .select_only()
            .column(entity::refinery::Column::SolarSystemId)
            .column_as(entity::refinery::Column::Income.sum(), "total")
            .group_by(entity::refinery::Column::SolarSystemId)
            .order_by_desc(entity::refinery::Column::Income.sum())
            .into_tuple::<(i64, f64)>()
            .one(self.db)
            .await
    }
}
