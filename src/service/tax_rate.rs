//! In-memory catalog of tax rates used while ingesting mining activity.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DbErr};

use crate::{data::tax_rate::TaxRateRepository, model::ledger::AppliedRate};

/// ISK value assigned to a unit of an ore type the first time it is seen
pub const DEFAULT_UNIT_VALUE: f64 = 100.0;
/// Tax percentage assigned to an ore type the first time it is seen
pub const DEFAULT_TAX_RATE: f64 = 5.0;
/// `updated_by` recorded for rates created by the invoice job rather than an operator
pub const SYSTEM_ACTOR_ID: i64 = 0;

/// Tax rates keyed by type ID, loaded once per run.
///
/// Types without a configured rate get the defaults. The default row is persisted the first
/// time such a type is looked up, later lookups in the same run hit the cache.
#[derive(Debug, Default)]
pub struct TaxRateCatalog {
    rates: HashMap<i64, AppliedRate>,
    /// Types this catalog created a default rate for
    synthesized: Vec<i64>,
}

impl TaxRateCatalog {
    /// Loads every configured tax rate
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, DbErr> {
        let rates = TaxRateRepository::new(db)
            .get_all()
            .await?
            .iter()
            .map(|model| (model.type_id, AppliedRate::from(model)))
            .collect();

        Ok(Self {
            rates,
            synthesized: Vec::new(),
        })
    }

    /// Rate for the type, persisting the default rate for types seen for the first time
    ///
    /// A rate inserted concurrently by another writer wins over the defaults, the stored row
    /// is returned instead.
    pub async fn rate_for<C: ConnectionTrait>(
        &mut self,
        db: &C,
        type_id: i64,
    ) -> Result<AppliedRate, DbErr> {
        if let Some(rate) = self.rates.get(&type_id) {
            return Ok(*rate);
        }

        let (model, inserted) = TaxRateRepository::new(db)
            .insert_if_absent(type_id, DEFAULT_UNIT_VALUE, DEFAULT_TAX_RATE, SYSTEM_ACTOR_ID)
            .await?;

        if inserted {
            tracing::info!(
                "Ore type {} has no tax rate, using {} ISK per unit at {}%",
                type_id,
                DEFAULT_UNIT_VALUE,
                DEFAULT_TAX_RATE
            );
            self.synthesized.push(type_id);
        }

        let rate = AppliedRate::from(&model);
        self.rates.insert(type_id, rate);

        Ok(rate)
    }

    pub fn synthesized(&self) -> &[i64] {
        &self.synthesized
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
