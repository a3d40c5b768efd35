/// A ledger figure attributed to a single miner, refinery or solar system
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTotal<T> {
    pub entry: T,
    pub total: f64,
}

/// Solar system ranked by the income of its refineries
#[derive(Debug, Clone, PartialEq)]
pub struct SystemIncome {
    pub solar_system_id: i64,
    /// `None` when the solar system hasn't been imported yet
    pub name: Option<String>,
}

/// Overview of outstanding tax and refinery income for an alliance
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    /// Sum of positive balances owed by alliance members
    pub total_amount_owed: f64,
    /// Income of all refineries
    pub total_income: f64,
    pub top_payer: Option<RankedTotal<entity::miner::Model>>,
    pub top_refinery: Option<entity::refinery::Model>,
    pub top_system: Option<RankedTotal<SystemIncome>>,
    /// Alliance members with a positive balance, largest first
    pub debtors: Vec<entity::miner::Model>,
    /// Miners outside of the alliance
    pub ninjas: Vec<entity::miner::Model>,
    /// All refineries, highest income first
    pub refineries: Vec<entity::refinery::Model>,
}
