use chrono::Utc;
use sea_orm::{
    sea_query::{OnConflict, Query},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

pub struct TaxRateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TaxRateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::tax_rate::Model>, DbErr> {
        entity::prelude::TaxRate::find()
            .order_by_asc(entity::tax_rate::Column::TypeId)
            .all(self.db)
            .await
    }

    pub async fn get_by_type_id(
        &self,
        type_id: i64,
    ) -> Result<Option<entity::tax_rate::Model>, DbErr> {
        entity::prelude::TaxRate::find()
            .filter(entity::tax_rate::Column::TypeId.eq(type_id))
            .one(self.db)
            .await
    }

    /// Inserts a tax rate unless one already exists for the type ID
    ///
    /// Relies on the unique constraint on `type_id` so two concurrent first sightings of a
    /// type resolve to a single row.
    ///
    /// # Returns
    /// - `Ok((model, true))` - Row was inserted by this call
    /// - `Ok((model, false))` - Row already existed, the stored values are returned unchanged
    pub async fn insert_if_absent(
        &self,
        type_id: i64,
        unit_value: f64,
        tax_rate: f64,
        updated_by: i64,
    ) -> Result<(entity::tax_rate::Model, bool), DbErr> {
        let now = Utc::now().naive_utc();

        let tax_rate = entity::tax_rate::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            unit_value: ActiveValue::Set(unit_value),
            tax_rate: ActiveValue::Set(tax_rate),
            updated_by: ActiveValue::Set(updated_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = entity::prelude::TaxRate::insert(tax_rate)
            .on_conflict(
                OnConflict::column(entity::tax_rate::Column::TypeId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let model = self.get_by_type_id(type_id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("tax rate for type ID {}", type_id))
        })?;

        Ok((model, inserted > 0))
    }

    /// Type IDs that have a tax rate but no `inv_type` metadata row yet
    pub async fn get_type_ids_without_metadata(&self) -> Result<Vec<i64>, DbErr> {
        entity::prelude::TaxRate::find()
            .select_only()
            .column(entity::tax_rate::Column::TypeId)
            .filter(
                entity::tax_rate::Column::TypeId.not_in_subquery(
                    Query::select()
                        .column(entity::inv_type::Column::TypeId)
                        .from(entity::prelude::InvType)
                        .to_owned(),
                ),
            )
            .order_by_asc(entity::tax_rate::Column::TypeId)
            .into_tuple::<i64>()
            .all(self.db)
            .await
    }
}
