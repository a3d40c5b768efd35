pub use sea_orm_migration::prelude::*;

mod m20251101_000001_tax_rate;
mod m20251101_000002_inv_type;
mod m20251101_000003_miner;
mod m20251101_000004_refinery;
mod m20251101_000005_solar_system;
mod m20251101_000006_mining_activity;
mod m20251101_000007_invoice;
mod m20251101_000008_payment;
mod m20251101_000009_template;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_tax_rate::Migration),
            Box::new(m20251101_000002_inv_type::Migration),
            Box::new(m20251101_000003_miner::Migration),
            Box::new(m20251101_000004_refinery::Migration),
            Box::new(m20251101_000005_solar_system::Migration),
            Box::new(m20251101_000006_mining_activity::Migration),
            Box::new(m20251101_000007_invoice::Migration),
            Box::new(m20251101_000008_payment::Migration),
            Box::new(m20251101_000009_template::Migration),
        ]
    }
}
