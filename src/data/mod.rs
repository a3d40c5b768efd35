//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries for a single table each. They are generic over
//! [`sea_orm::ConnectionTrait`] so the same repository can run against the connection pool
//! or inside the transaction that couples activity claims with balance updates.

pub mod inv_type;
pub mod invoice;
pub mod miner;
pub mod mining_activity;
pub mod payment;
pub mod refinery;
pub mod solar_system;
pub mod tax_rate;
pub mod template;

#[cfg(test)]
mod tests;
