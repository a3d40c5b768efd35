use sea_orm::ConnectionTrait;

use crate::{
    data::{miner::MinerRepository, refinery::RefineryRepository},
    error::{ledger::LedgerError, Error},
    model::ledger::LedgerDeltas,
};

/// Applies accumulated tax deltas to miner balances and refinery income.
pub struct LedgerAggregator<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LedgerAggregator<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Increments every miner's `amount_owed` and every refinery's `income` by its delta
    ///
    /// Must run on the same transaction that claimed the activity, an error leaves part of the
    /// deltas applied and the caller is expected to roll back.
    ///
    /// # Returns
    /// - `Ok(())` - Every delta applied
    /// - `Err(LedgerError::MinerNotFound)` - A miner row disappeared since ingestion
    /// - `Err(LedgerError::RefineryNotFound)` - A refinery row disappeared since ingestion
    /// - `Err(Error::DbErr)` - Update failed
    pub async fn apply_deltas(&self, deltas: &LedgerDeltas) -> Result<(), Error> {
        let miner_repo = MinerRepository::new(self.db);
        for (&miner_id, &amount) in &deltas.miners {
            if !miner_repo.add_amount_owed(miner_id, amount).await? {
                return Err(LedgerError::MinerNotFound(miner_id).into());
            }
        }

        let refinery_repo = RefineryRepository::new(self.db);
        for (&refinery_id, &amount) in &deltas.refineries {
            if !refinery_repo.add_income(refinery_id, amount).await? {
                return Err(LedgerError::RefineryNotFound(refinery_id).into());
            }
        }

        tracing::debug!(
            "Applied {:.2} ISK to {} miner(s) and {} refinery(ies)",
            deltas.miner_total(),
            deltas.miners.len(),
            deltas.refineries.len()
        );

        Ok(())
    }
}
