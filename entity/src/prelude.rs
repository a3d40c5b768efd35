pub use super::inv_type::Entity as InvType;
pub use super::invoice::Entity as Invoice;
pub use super::miner::Entity as Miner;
pub use super::mining_activity::Entity as MiningActivity;
pub use super::payment::Entity as Payment;
pub use super::refinery::Entity as Refinery;
pub use super::solar_system::Entity as SolarSystem;
pub use super::tax_rate::Entity as TaxRate;
pub use super::template::Entity as Template;
