//! Test fixture modules for database and HTTP mock creation.
//!
//! - `ledger` - Miner, refinery, tax rate and mining activity records
//! - `esi` - ESI response bodies and mock endpoints

pub mod esi;
pub mod ledger;
