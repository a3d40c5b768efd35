//! Claims unprocessed mining activity and prices it.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;

use crate::{
    data::{
        miner::MinerRepository, mining_activity::MiningActivityRepository,
        refinery::RefineryRepository,
    },
    error::Error,
    model::{
        ledger::{Inconsistency, LedgerDeltas},
        report::IngestOutcome,
    },
    service::tax_rate::TaxRateCatalog,
};

pub struct ActivityIngester<'a, C: ConnectionTrait> {
    db: &'a C,
    catalog: &'a mut TaxRateCatalog,
}

impl<'a, C: ConnectionTrait> ActivityIngester<'a, C> {
    pub fn new(db: &'a C, catalog: &'a mut TaxRateCatalog) -> Self {
        Self { db, catalog }
    }

    /// Claims every unprocessed record and accumulates its tax per miner and refinery
    ///
    /// Each record is claimed with a compare-and-set, a record claimed by someone else in the
    /// meantime is skipped so its tax is never counted twice. Records referencing a miner or
    /// refinery without a row are reported and stay unprocessed.
    pub async fn ingest(&mut self) -> Result<IngestOutcome, Error> {
        let activity = MiningActivityRepository::new(self.db)
            .get_unprocessed()
            .await?;

        if activity.is_empty() {
            tracing::debug!("No unprocessed mining activity");
            return Ok(IngestOutcome::default());
        }

        self.ingest_records(activity).await
    }

    /// Claims and taxes a previously selected batch of records
    async fn ingest_records(
        &mut self,
        activity: Vec<entity::mining_activity::Model>,
    ) -> Result<IngestOutcome, Error> {
        let activity_repo = MiningActivityRepository::new(self.db);

        let miner_ids: Vec<i64> = activity
            .iter()
            .map(|record| record.miner_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let refinery_ids: Vec<i64> = activity
            .iter()
            .map(|record| record.refinery_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let known_miners = MinerRepository::new(self.db)
            .get_existing_eve_ids(&miner_ids)
            .await?;
        let known_refineries = RefineryRepository::new(self.db)
            .get_existing_observer_ids(&refinery_ids)
            .await?;

        let mut outcome = IngestOutcome::default();

        for record in activity {
            let missing_miner =
                (!known_miners.contains(&record.miner_id)).then_some(record.miner_id);
            let missing_refinery =
                (!known_refineries.contains(&record.refinery_id)).then_some(record.refinery_id);

            if missing_miner.is_some() || missing_refinery.is_some() {
                tracing::error!(
                    "Skipping mining activity {}: miner {} or refinery {} does not exist",
                    record.id,
                    record.miner_id,
                    record.refinery_id
                );
                outcome.skipped.push(Inconsistency {
                    activity_id: record.id,
                    missing_miner,
                    missing_refinery,
                });
                continue;
            }

            if !activity_repo.claim(record.id).await? {
                tracing::debug!("Mining activity {} was already claimed", record.id);
                continue;
            }

            let rate = self.catalog.rate_for(self.db, record.type_id).await?;

            outcome
                .deltas
                .credit(record.miner_id, record.refinery_id, rate.tax_for(record.quantity));
            outcome.processed += 1;
        }

        tracing::info!(
            "Claimed {} mining record(s) for {} miner(s), {} skipped",
            outcome.processed,
            outcome.deltas.miners.len(),
            outcome.skipped.len()
        );

        Ok(outcome)
    }
}
