use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

pub struct MiningActivityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MiningActivityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a single extraction event as unprocessed
    pub async fn create(
        &self,
        type_id: i64,
        quantity: i64,
        miner_id: i64,
        refinery_id: i64,
    ) -> Result<entity::mining_activity::Model, DbErr> {
        let activity = entity::mining_activity::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            quantity: ActiveValue::Set(quantity),
            miner_id: ActiveValue::Set(miner_id),
            refinery_id: ActiveValue::Set(refinery_id),
            processed: ActiveValue::Set(false),
            processed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        activity.insert(self.db).await
    }

    pub async fn get_unprocessed(&self) -> Result<Vec<entity::mining_activity::Model>, DbErr> {
        entity::prelude::MiningActivity::find()
            .filter(entity::mining_activity::Column::Processed.eq(false))
            .order_by_asc(entity::mining_activity::Column::Id)
            .all(self.db)
            .await
    }

    /// Marks a record as processed if, and only if, it is still unprocessed
    ///
    /// # Returns
    /// - `Ok(true)` - This call flipped the record to processed and owns its tax amount
    /// - `Ok(false)` - Record was already processed (or doesn't exist)
    pub async fn claim(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::MiningActivity::update_many()
            .col_expr(entity::mining_activity::Column::Processed, Expr::value(true))
            .col_expr(
                entity::mining_activity::Column::ProcessedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::mining_activity::Column::Id.eq(id))
            .filter(entity::mining_activity::Column::Processed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
