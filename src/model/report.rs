//! Outcomes of the individual pipeline phases and the report for a whole run.

use std::fmt;

use crate::{
    esi::model::MailMessage,
    model::ledger::{Inconsistency, LedgerDeltas},
};

/// Result of claiming unprocessed mining activity
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub deltas: LedgerDeltas,
    /// Number of records claimed and taxed by this run
    pub processed: usize,
    /// Records left unprocessed because their miner or refinery doesn't exist
    pub skipped: Vec<Inconsistency>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedMetadataFetch {
    pub type_id: i64,
    pub error: String,
}

/// Result of fetching display metadata for types that don't have any yet
#[derive(Debug, Clone, Default)]
pub struct MetadataBackfill {
    pub stored: Vec<i64>,
    pub failed: Vec<FailedMetadataFetch>,
}

/// An invoice that was mailed and recorded
#[derive(Debug, Clone)]
pub struct DispatchedInvoice {
    pub invoice_id: i32,
    pub miner_id: i64,
    pub amount: f64,
    pub mail: MailMessage,
}

/// A debtor whose invoice mail could not be sent, no invoice row was recorded
#[derive(Debug, Clone)]
pub struct FailedDispatch {
    pub miner_id: i64,
    pub amount: f64,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct SettlementOutcome {
    pub dispatched: Vec<DispatchedInvoice>,
    pub failed: Vec<FailedDispatch>,
}

/// Summary of a complete invoice job run
#[derive(Debug, Clone, Default)]
pub struct InvoiceRunReport {
    pub processed: usize,
    pub skipped: Vec<Inconsistency>,
    /// Types that were given a default tax rate during this run
    pub synthesized_types: Vec<i64>,
    pub miner_total: f64,
    pub refinery_total: f64,
    pub metadata: MetadataBackfill,
    pub settlement: SettlementOutcome,
}

impl fmt::Display for InvoiceRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} mining record(s) ({} skipped) for {:.2} ISK tax, \
            {} new ore type(s), {} invoice(s) sent, {} failed",
            self.processed,
            self.skipped.len(),
            self.miner_total,
            self.synthesized_types.len(),
            self.settlement.dispatched.len(),
            self.settlement.failed.len()
        )
    }
}
