//! The weekly invoice pipeline.

use std::{sync::Arc, time::Duration};

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    error::Error,
    esi::{Messenger, TypeMetadataProvider},
    lock::RunLock,
    model::report::InvoiceRunReport,
    service::{
        ingest::ActivityIngester, ledger::LedgerAggregator, settlement::InvoiceSettlement,
        tax_rate::TaxRateCatalog, type_metadata::TypeMetadataService,
    },
};

/// Settings for [`InvoiceJob`] that don't come from its collaborators
#[derive(Debug, Clone)]
pub struct InvoiceJobConfig {
    /// Name of the template invoices are rendered from
    pub template_name: String,
    /// Backoff before the first retry of a failed metadata fetch
    pub metadata_retry_backoff: Duration,
}

impl Default for InvoiceJobConfig {
    fn default() -> Self {
        Self {
            template_name: "weekly_invoice".to_string(),
            metadata_retry_backoff: Duration::from_secs(1),
        }
    }
}

pub struct InvoiceJob {
    db: DatabaseConnection,
    type_provider: Arc<dyn TypeMetadataProvider>,
    messenger: Arc<dyn Messenger>,
    lock: RunLock,
    config: InvoiceJobConfig,
}

impl InvoiceJob {
    pub fn new(
        db: DatabaseConnection,
        type_provider: Arc<dyn TypeMetadataProvider>,
        messenger: Arc<dyn Messenger>,
        lock: RunLock,
        config: InvoiceJobConfig,
    ) -> Self {
        Self {
            db,
            type_provider,
            messenger,
            lock,
            config,
        }
    }

    /// Runs the pipeline dated today (UTC)
    pub async fn run(&self) -> Result<Option<InvoiceRunReport>, Error> {
        self.run_on(Utc::now().date_naive()).await
    }

    /// Runs the pipeline with invoices dated `run_date`
    ///
    /// # Returns
    /// - `Ok(Some(report))` - Run completed, individual metadata or mail failures are in the
    ///   report
    /// - `Ok(None)` - Another run holds the lock, nothing was done
    /// - `Err(Error)` - Run aborted, any ledger changes of this run were rolled back unless
    ///   the failure happened during settlement
    pub async fn run_on(&self, run_date: NaiveDate) -> Result<Option<InvoiceRunReport>, Error> {
        let Some(guard) = self.lock.try_acquire().await? else {
            tracing::info!("Invoice job is already running elsewhere, skipping this run");
            return Ok(None);
        };

        let result = self.run_pipeline(run_date).await;

        if let Err(e) = guard.release().await {
            tracing::warn!("Failed to release invoice job lock: {}", e);
        }

        result.map(Some)
    }

    async fn run_pipeline(&self, run_date: NaiveDate) -> Result<InvoiceRunReport, Error> {
        // Claims and balance updates commit together or not at all
        let txn = self.db.begin().await?;

        let mut catalog = TaxRateCatalog::load(&txn).await?;
        tracing::debug!("Loaded {} configured tax rate(s)", catalog.len());
        let ingest = ActivityIngester::new(&txn, &mut catalog).ingest().await?;
        LedgerAggregator::new(&txn)
            .apply_deltas(&ingest.deltas)
            .await?;

        txn.commit().await?;

        let metadata = TypeMetadataService::new(self.db.clone(), self.type_provider.clone())
            .with_retry_backoff(self.config.metadata_retry_backoff)
            .backfill_missing()
            .await?;

        let settlement = InvoiceSettlement::new(
            &self.db,
            self.messenger.as_ref(),
            &self.config.template_name,
        )
        .settle(run_date)
        .await?;

        let report = InvoiceRunReport {
            processed: ingest.processed,
            skipped: ingest.skipped,
            synthesized_types: catalog.synthesized().to_vec(),
            miner_total: ingest.deltas.miner_total(),
            refinery_total: ingest.deltas.refinery_total(),
            metadata,
            settlement,
        };

        tracing::info!("Invoice run for {} complete: {}", run_date, report);

        Ok(report)
    }
}
