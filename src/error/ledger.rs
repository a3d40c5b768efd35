//! Ledger consistency error types.
//!
//! These errors indicate that the persisted ledger does not line up with the data the
//! invoice job is processing, for example a balance delta computed for a miner that has
//! no row in the database. They are never retried, an operator has to fix the data.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// A tax delta was computed for a miner that does not exist.
    ///
    /// Applying the remaining deltas would leave claimed mining activity uncredited, so the
    /// surrounding transaction is rolled back and the records stay unprocessed.
    #[error("No miner with EVE ID {0} exists to credit an owed amount to")]
    MinerNotFound(i64),
    /// An income delta was computed for a refinery that does not exist.
    #[error("No refinery with observer ID {0} exists to credit income to")]
    RefineryNotFound(i64),
    /// The invoice template configured for settlement is missing.
    #[error("Invoice template {0:?} does not exist, no invoices can be sent")]
    TemplateNotFound(String),
}
