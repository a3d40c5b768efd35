//! Tests for LedgerSummaryService::summary.

use ore_ledger::service::summary::LedgerSummaryService;
use ore_ledger_test_utils::prelude::*;

const ALLIANCE_ID: i64 = 99013537;

/// Expect members and outsiders to be separated and the top entries to be found
#[tokio::test]
async fn summarizes_alliance_ledger() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_miner(1, Some(ALLIANCE_ID), 300.0)
        .with_miner(2, Some(ALLIANCE_ID), 700.0)
        .with_miner(3, Some(ALLIANCE_ID), 0.0)
        .with_miner(4, Some(99000001), 50.0)
        .with_miner(5, None, 25.0)
        .with_refinery(10, 30002187, 400.0)
        .with_refinery(11, 30002187, 200.0)
        .with_refinery(12, 30000142, 500.0)
        .with_solar_system(30002187, "Amarr")
        .with_payment(1, 100.0)
        .with_payment(2, 50.0)
        .with_payment(2, 75.0)
        .build()
        .await?;

    let result = LedgerSummaryService::new(&test.db, ALLIANCE_ID).summary().await;

    assert!(result.is_ok());
    let summary = result.unwrap();
    assert_eq!(summary.total_amount_owed, 1000.0);
    assert_eq!(summary.total_income, 1100.0);

    let top_payer = summary.top_payer.unwrap();
    assert_eq!(top_payer.entry.eve_id, 2);
    assert_eq!(top_payer.total, 125.0);

    assert_eq!(summary.top_refinery.map(|refinery| refinery.observer_id), Some(12));

    let top_system = summary.top_system.unwrap();
    assert_eq!(top_system.entry.solar_system_id, 30002187);
    assert_eq!(top_system.entry.name.as_deref(), Some("Amarr"));
    assert_eq!(top_system.total, 600.0);

    let debtors: Vec<i64> = summary.debtors.iter().map(|miner| miner.eve_id).collect();
    let ninjas: Vec<i64> = summary.ninjas.iter().map(|miner| miner.eve_id).collect();
    let refineries: Vec<i64> = summary
        .refineries
        .iter()
        .map(|refinery| refinery.observer_id)
        .collect();
    assert_eq!(debtors, vec![2, 1]);
    assert_eq!(ninjas, vec![4, 5]);
    assert_eq!(refineries, vec![12, 10, 11]);

    Ok(())
}

/// Expect an empty ledger to summarize to zeros without top entries
#[tokio::test]
async fn summarizes_empty_ledger() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;

    let result = LedgerSummaryService::new(&test.db, ALLIANCE_ID).summary().await;

    assert!(result.is_ok());
    let summary = result.unwrap();
    assert_eq!(summary.total_amount_owed, 0.0);
    assert_eq!(summary.total_income, 0.0);
    assert!(summary.top_payer.is_none());
    assert!(summary.top_refinery.is_none());
    assert!(summary.top_system.is_none());
    assert!(summary.debtors.is_empty());

    Ok(())
}

/// Expect the top system without a name when it hasn't been imported
#[tokio::test]
async fn top_system_name_is_optional() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_refinery(10, 30002187, 400.0)
        .build()
        .await?;

    let result = LedgerSummaryService::new(&test.db, ALLIANCE_ID).summary().await;

    assert!(result.is_ok());
    let top_system = result.unwrap().top_system.unwrap();
    assert_eq!(top_system.entry.solar_system_id, 30002187);
    assert!(top_system.entry.name.is_none());

    Ok(())
}
