pub mod ingest;
pub mod invoice_job;
pub mod ledger;
pub mod retry;
pub mod settlement;
pub mod summary;
pub mod tax_rate;
pub mod type_metadata;
