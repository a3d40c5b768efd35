use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
    QuerySelect,
};

/// Payments are recorded by wallet reconciliation outside of the invoice job, the ledger
/// only reads them for reporting.
pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        miner_id: i64,
        amount_received: f64,
    ) -> Result<entity::payment::Model, DbErr> {
        let payment = entity::payment::ActiveModel {
            miner_id: ActiveValue::Set(miner_id),
            amount_received: ActiveValue::Set(amount_received),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        payment.insert(self.db).await
    }

    /// Miner that has paid the most in total
    ///
    /// # Returns
    /// - `Some((miner_id, total_paid))` - Top payer
    /// - `None` - No payments recorded
    pub async fn get_top_payer(&self) -> Result<Option<(i64, f64)>, DbErr> {
        entity::prelude::Payment::find()
            .select_only()
            .column(entity::payment::Column::MinerId)
            .column_as(entity::payment::Column::AmountReceived.sum(), "total")
            .group_by(entity::payment::Column::MinerId)
            .order_by_desc(entity::payment::Column::AmountReceived.sum())
            .into_tuple::<(i64, f64)>()
            .one(self.db)
            .await
    }
}
