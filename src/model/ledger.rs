use std::collections::BTreeMap;

/// Valuation and tax percentage resolved for a single ore type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedRate {
    /// ISK value of a single unit of the ore
    pub unit_value: f64,
    /// Percentage of the total value charged as tax, conventionally within 0..=100
    pub tax_rate: f64,
}

impl AppliedRate {
    /// Tax owed for mining `quantity` units: `quantity * unit_value * tax_rate / 100`
    pub fn tax_for(&self, quantity: i64) -> f64 {
        let total_value = quantity as f64 * self.unit_value;
        total_value * self.tax_rate / 100.0
    }
}

impl From<&entity::tax_rate::Model> for AppliedRate {
    fn from(model: &entity::tax_rate::Model) -> Self {
        Self {
            unit_value: model.unit_value,
            tax_rate: model.tax_rate,
        }
    }
}

/// Per-miner owed amounts and per-refinery income accumulated during ingestion.
///
/// Every credit adds the same amount to both sides, so the miner and refinery totals always
/// match. Keys are EVE IDs (miner) and observer IDs (refinery); ordered maps keep balance
/// updates in a stable order across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerDeltas {
    pub miners: BTreeMap<i64, f64>,
    pub refineries: BTreeMap<i64, f64>,
}

impl LedgerDeltas {
    pub fn credit(&mut self, miner_id: i64, refinery_id: i64, amount: f64) {
        *self.miners.entry(miner_id).or_insert(0.0) += amount;
        *self.refineries.entry(refinery_id).or_insert(0.0) += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.miners.is_empty() && self.refineries.is_empty()
    }

    pub fn miner_total(&self) -> f64 {
        self.miners.values().sum()
    }

    pub fn refinery_total(&self) -> f64 {
        self.refineries.values().sum()
    }
}

/// Mining activity left unprocessed because it references ledger rows that don't exist
#[derive(Debug, Clone, PartialEq)]
pub struct Inconsistency {
    pub activity_id: i32,
    /// Set when the miner the activity belongs to has no row
    pub missing_miner: Option<i64>,
    /// Set when the refinery the activity was mined at has no row
    pub missing_refinery: Option<i64>,
}
