use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct InvoiceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvoiceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an invoice to the ledger, invoices are never updated afterwards
    pub async fn create(
        &self,
        miner_id: i64,
        amount: f64,
    ) -> Result<entity::invoice::Model, DbErr> {
        let invoice = entity::invoice::ActiveModel {
            miner_id: ActiveValue::Set(miner_id),
            amount: ActiveValue::Set(amount),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        invoice.insert(self.db).await
    }

    pub async fn get_by_miner_id(
        &self,
        miner_id: i64,
    ) -> Result<Vec<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::MinerId.eq(miner_id))
            .order_by_asc(entity::invoice::Column::Id)
            .all(self.db)
            .await
    }
}
