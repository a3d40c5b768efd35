//! Ledger record insertion utilities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn ledger(&self) -> LedgerFixtures<'_> {
        LedgerFixtures { context: self }
    }
}

pub struct LedgerFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> LedgerFixtures<'a> {
    /// Insert a miner named `Miner {eve_id}` with the provided balance
    pub async fn insert_miner(
        &self,
        eve_id: i64,
        alliance_id: Option<i64>,
        amount_owed: f64,
    ) -> Result<entity::miner::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::miner::ActiveModel {
            eve_id: ActiveValue::Set(eve_id),
            name: ActiveValue::Set(format!("Miner {}", eve_id)),
            amount_owed: ActiveValue::Set(amount_owed),
            alliance_id: ActiveValue::Set(alliance_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    /// Insert a refinery named `Refinery {observer_id}` with the provided income
    pub async fn insert_refinery(
        &self,
        observer_id: i64,
        solar_system_id: i64,
        income: f64,
    ) -> Result<entity::refinery::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::refinery::ActiveModel {
            observer_id: ActiveValue::Set(observer_id),
            name: ActiveValue::Set(format!("Refinery {}", observer_id)),
            solar_system_id: ActiveValue::Set(solar_system_id),
            income: ActiveValue::Set(income),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    pub async fn insert_tax_rate(
        &self,
        type_id: i64,
        unit_value: f64,
        tax_rate: f64,
    ) -> Result<entity::tax_rate::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::tax_rate::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            unit_value: ActiveValue::Set(unit_value),
            tax_rate: ActiveValue::Set(tax_rate),
            updated_by: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    /// Insert an unprocessed mining activity record
    pub async fn insert_mining_activity(
        &self,
        type_id: i64,
        quantity: i64,
        miner_id: i64,
        refinery_id: i64,
    ) -> Result<entity::mining_activity::Model, TestError> {
        Ok(entity::mining_activity::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            quantity: ActiveValue::Set(quantity),
            miner_id: ActiveValue::Set(miner_id),
            refinery_id: ActiveValue::Set(refinery_id),
            processed: ActiveValue::Set(false),
            processed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    pub async fn insert_template(
        &self,
        name: &str,
        subject: &str,
        body: &str,
    ) -> Result<entity::template::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::template::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            subject: ActiveValue::Set(subject.to_string()),
            body: ActiveValue::Set(body.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    /// Insert display metadata for a type named `Ore {type_id}`
    pub async fn insert_inv_type(&self, type_id: i64) -> Result<entity::inv_type::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::inv_type::ActiveModel {
            type_id: ActiveValue::Set(type_id),
            group_id: ActiveValue::Set(1884),
            name: ActiveValue::Set(format!("Ore {}", type_id)),
            description: ActiveValue::Set(String::new()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    pub async fn insert_payment(
        &self,
        miner_id: i64,
        amount_received: f64,
    ) -> Result<entity::payment::Model, TestError> {
        Ok(entity::payment::ActiveModel {
            miner_id: ActiveValue::Set(miner_id),
            amount_received: ActiveValue::Set(amount_received),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }

    pub async fn insert_solar_system(
        &self,
        solar_system_id: i64,
        name: &str,
    ) -> Result<entity::solar_system::Model, TestError> {
        Ok(entity::solar_system::ActiveModel {
            solar_system_id: ActiveValue::Set(solar_system_id),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.context.db)
        .await?)
    }
}
