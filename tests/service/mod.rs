mod invoice_job;
mod settlement;
mod summary;
mod type_metadata;
