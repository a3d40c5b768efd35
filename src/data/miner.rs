use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

const ID_LOOKUP_BATCH_SIZE: usize = 1000;

pub struct MinerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MinerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        eve_id: i64,
        name: &str,
        alliance_id: Option<i64>,
    ) -> Result<entity::miner::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let miner = entity::miner::ActiveModel {
            eve_id: ActiveValue::Set(eve_id),
            name: ActiveValue::Set(name.to_string()),
            amount_owed: ActiveValue::Set(0.0),
            alliance_id: ActiveValue::Set(alliance_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        miner.insert(self.db).await
    }

    pub async fn get_by_eve_id(&self, eve_id: i64) -> Result<Option<entity::miner::Model>, DbErr> {
        entity::prelude::Miner::find()
            .filter(entity::miner::Column::EveId.eq(eve_id))
            .one(self.db)
            .await
    }

    /// Returns which of the provided EVE IDs have a miner row
    ///
    /// IDs are looked up in batches so the `IN` filter stays below the database's bind
    /// parameter limit regardless of how many IDs are passed.
    pub async fn get_existing_eve_ids(&self, eve_ids: &[i64]) -> Result<HashSet<i64>, DbErr> {
        let mut existing = HashSet::new();

        for batch in eve_ids.chunks(ID_LOOKUP_BATCH_SIZE) {
            let found = entity::prelude::Miner::find()
                .select_only()
                .column(entity::miner::Column::EveId)
                .filter(entity::miner::Column::EveId.is_in(batch.iter().copied()))
                .into_tuple::<i64>()
                .all(self.db)
                .await?;

            existing.extend(found);
        }

        Ok(existing)
    }

    /// Atomically adds `amount` to a miner's outstanding balance
    ///
    /// The increment is evaluated by the database (`amount_owed = amount_owed + amount`) so
    /// concurrent writers cannot lose each other's updates.
    ///
    /// # Returns
    /// - `Ok(true)` - Balance updated
    /// - `Ok(false)` - No miner with the EVE ID exists
    pub async fn add_amount_owed(&self, eve_id: i64, amount: f64) -> Result<bool, DbErr> {
        let result = entity::prelude::Miner::update_many()
            .col_expr(
                entity::miner::Column::AmountOwed,
                Expr::col(entity::miner::Column::AmountOwed).add(amount),
            )
            .col_expr(
                entity::miner::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::miner::Column::EveId.eq(eve_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// All miners with a positive outstanding balance, ordered by EVE ID
    pub async fn get_debtors(&self) -> Result<Vec<entity::miner::Model>, DbErr> {
        entity::prelude::Miner::find()
            .filter(entity::miner::Column::AmountOwed.gt(0.0))
            .order_by_asc(entity::miner::Column::EveId)
            .all(self.db)
            .await
    }

    /// Members of the alliance with a positive balance, largest balance first
    pub async fn get_alliance_debtors(
        &self,
        alliance_id: i64,
    ) -> Result<Vec<entity::miner::Model>, DbErr> {
        entity::prelude::Miner::find()
            .filter(entity::miner::Column::AmountOwed.gt(0.0))
            .filter(entity::miner::Column::AllianceId.eq(alliance_id))
            .order_by_desc(entity::miner::Column::AmountOwed)
            .all(self.db)
            .await
    }

    /// Miners that are not members of the alliance, including those without any alliance
    pub async fn get_outside_alliance(
        &self,
        alliance_id: i64,
    ) -> Result<Vec<entity::miner::Model>, DbErr> {
        entity::prelude::Miner::find()
            .filter(
                Condition::any()
                    .add(entity::miner::Column::AllianceId.is_null())
                    .add(entity::miner::Column::AllianceId.ne(alliance_id)),
            )
            .order_by_asc(entity::miner::Column::Name)
            .all(self.db)
            .await
    }

    /// Sum of positive balances owed by members of the alliance
    pub async fn get_alliance_total_owed(&self, alliance_id: i64) -> Result<f64, DbErr> {
        let total = entity::prelude::Miner::find()
            .select_only()
            .column_as(entity::miner::Column::AmountOwed.sum(), "total")
            .filter(entity::miner::Column::AmountOwed.gt(0.0))
            .filter(entity::miner::Column::AllianceId.eq(alliance_id))
            .into_tuple::<Option<f64>>()
            .one(self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0.0))
    }
}
