//! Read-only overview of the ledger for an alliance.

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        miner::MinerRepository, payment::PaymentRepository, refinery::RefineryRepository,
        solar_system::SolarSystemRepository,
    },
    error::Error,
    model::summary::{LedgerSummary, RankedTotal, SystemIncome},
};

pub struct LedgerSummaryService<'a> {
    db: &'a DatabaseConnection,
    alliance_id: i64,
}

impl<'a> LedgerSummaryService<'a> {
    pub fn new(db: &'a DatabaseConnection, alliance_id: i64) -> Self {
        Self { db, alliance_id }
    }

    pub async fn summary(&self) -> Result<LedgerSummary, Error> {
        let miner_repo = MinerRepository::new(self.db);
        let refinery_repo = RefineryRepository::new(self.db);

        let top_payer = match PaymentRepository::new(self.db).get_top_payer().await? {
            // A payment may reference a miner that has since been removed
            Some((miner_id, total)) => miner_repo
                .get_by_eve_id(miner_id)
                .await?
                .map(|entry| RankedTotal { entry, total }),
            None => None,
        };

        let top_system = match refinery_repo.get_top_solar_system().await? {
            Some((solar_system_id, total)) => {
                let name = SolarSystemRepository::new(self.db)
                    .get_by_solar_system_id(solar_system_id)
                    .await?
                    .map(|system| system.name);

                Some(RankedTotal {
                    entry: SystemIncome {
                        solar_system_id,
                        name,
                    },
                    total,
                })
            }
            None => None,
        };

        let refineries = refinery_repo.get_all_by_income().await?;

        Ok(LedgerSummary {
            total_amount_owed: miner_repo.get_alliance_total_owed(self.alliance_id).await?,
            total_income: refinery_repo.get_total_income().await?,
            top_payer,
            top_refinery: refineries.first().cloned(),
            top_system,
            debtors: miner_repo.get_alliance_debtors(self.alliance_id).await?,
            ninjas: miner_repo.get_outside_alliance(self.alliance_id).await?,
            refineries,
        })
    }
}
