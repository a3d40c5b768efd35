pub mod prelude;

pub mod inv_type;
pub mod invoice;
pub mod miner;
pub mod mining_activity;
pub mod payment;
pub mod refinery;
pub mod solar_system;
pub mod tax_rate;
pub mod template;
