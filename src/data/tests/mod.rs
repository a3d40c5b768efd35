use std::collections::HashSet;

use ore_ledger_test_utils::prelude::*;

use crate::data::{
    inv_type::InvTypeRepository, invoice::InvoiceRepository, miner::MinerRepository,
    mining_activity::MiningActivityRepository, payment::PaymentRepository,
    refinery::RefineryRepository, solar_system::SolarSystemRepository,
    tax_rate::TaxRateRepository, template::TemplateRepository,
};
