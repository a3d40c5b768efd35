//! Tests for InvoiceJob::run, the complete ingest, aggregate and settle pipeline.

use chrono::NaiveDate;
use ore_ledger::{
    data::{
        invoice::InvoiceRepository, miner::MinerRepository,
        mining_activity::MiningActivityRepository, refinery::RefineryRepository,
        tax_rate::TaxRateRepository,
    },
    error::{ledger::LedgerError, Error},
    lock::RunLock,
    service::tax_rate::{DEFAULT_TAX_RATE, DEFAULT_UNIT_VALUE, SYSTEM_ACTOR_ID},
};
use ore_ledger_test_utils::prelude::*;
use sea_orm::EntityTrait;

use crate::util::{invoice_job, invoice_job_with_lock, ledger_builder};

const MINER_ID: i64 = 2114794365;
const REFINERY_ID: i64 = 1035466617946;
const SOLAR_SYSTEM_ID: i64 = 30002187;

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
}

/// Expect 1000 units valued at 5 ISK taxed at 10% to add 500 ISK to the miner and refinery
#[tokio::test]
async fn taxes_activity_at_configured_rate() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_inv_type(34)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .with_mail_endpoint(MINER_ID, 201, 1)
        .build()
        .await?;

    let result = invoice_job(&test).run_on(run_date()).await;

    assert!(result.is_ok());
    let report = result.unwrap().unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.miner_total, 500.0);
    assert_eq!(report.refinery_total, 500.0);
    assert!(report.synthesized_types.is_empty());

    let miner = MinerRepository::new(&test.db).get_by_eve_id(MINER_ID).await?.unwrap();
    let refinery = RefineryRepository::new(&test.db)
        .get_by_observer_id(REFINERY_ID)
        .await?
        .unwrap();
    assert_eq!(miner.amount_owed, 500.0);
    assert_eq!(refinery.income, 500.0);

    let invoices = InvoiceRepository::new(&test.db).get_by_miner_id(MINER_ID).await?;
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].amount, 500.0);

    assert!(MiningActivityRepository::new(&test.db)
        .get_unprocessed()
        .await?
        .is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expect a single default tax rate row for an unknown type seen in several records
#[tokio::test]
async fn synthesizes_one_rate_for_unknown_type() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_mining_activity(99, 10, MINER_ID, REFINERY_ID)
        .with_mining_activity(99, 30, MINER_ID, REFINERY_ID)
        .with_type_endpoint(99, 1)
        .with_mail_endpoint(MINER_ID, 201, 1)
        .build()
        .await?;

    let result = invoice_job(&test).run_on(run_date()).await;

    assert!(result.is_ok());
    let report = result.unwrap().unwrap();
    assert_eq!(report.synthesized_types, vec![99]);
    assert_eq!(report.metadata.stored, vec![99]);

    let rates = TaxRateRepository::new(&test.db).get_all().await?;
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].type_id, 99);
    assert_eq!(rates[0].unit_value, DEFAULT_UNIT_VALUE);
    assert_eq!(rates[0].tax_rate, DEFAULT_TAX_RATE);
    assert_eq!(rates[0].updated_by, SYSTEM_ACTOR_ID);

    // 40 units * 100 ISK * 5%
    assert_eq!(report.miner_total, 200.0);

    let inv_type = entity::prelude::InvType::find().all(&test.db).await?;
    assert_eq!(inv_type.len(), 1);
    assert_eq!(inv_type[0].name, "Ore 99");

    test.assert_mocks();

    Ok(())
}

/// Expect a second run without new activity to leave balances unchanged
///
/// Balances are not reset after invoicing, so the second run invoices the same amount again.
#[tokio::test]
async fn rerun_does_not_charge_twice() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_inv_type(34)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .with_mail_endpoint(MINER_ID, 201, 2)
        .build()
        .await?;

    let job = invoice_job(&test);
    let first = job.run_on(run_date()).await;
    let second = job.run_on(run_date()).await;

    assert!(first.is_ok());
    assert!(second.is_ok());
    let second = second.unwrap().unwrap();
    assert_eq!(second.processed, 0);
    assert_eq!(second.miner_total, 0.0);

    let miner = MinerRepository::new(&test.db).get_by_eve_id(MINER_ID).await?.unwrap();
    let refinery = RefineryRepository::new(&test.db)
        .get_by_observer_id(REFINERY_ID)
        .await?
        .unwrap();
    assert_eq!(miner.amount_owed, 500.0);
    assert_eq!(refinery.income, 500.0);

    let amounts: Vec<f64> = InvoiceRepository::new(&test.db)
        .get_by_miner_id(MINER_ID)
        .await?
        .into_iter()
        .map(|invoice| invoice.amount)
        .collect();
    assert_eq!(amounts, vec![500.0, 500.0]);

    test.assert_mocks();

    Ok(())
}

/// Expect activity of an unknown miner to stay unprocessed while other records are taxed
#[tokio::test]
async fn skips_activity_of_missing_miner() -> Result<(), TestError> {
    let unknown_miner_id = 95465499;

    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_inv_type(34)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .with_mining_activity(34, 2000, unknown_miner_id, REFINERY_ID)
        .with_mail_endpoint(MINER_ID, 201, 1)
        .build()
        .await?;

    let result = invoice_job(&test).run_on(run_date()).await;

    assert!(result.is_ok());
    let report = result.unwrap().unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].missing_miner, Some(unknown_miner_id));
    assert_eq!(report.skipped[0].missing_refinery, None);

    let unprocessed = MiningActivityRepository::new(&test.db)
        .get_unprocessed()
        .await?;
    assert_eq!(unprocessed.len(), 1);
    assert_eq!(unprocessed[0].miner_id, unknown_miner_id);

    let refinery = RefineryRepository::new(&test.db)
        .get_by_observer_id(REFINERY_ID)
        .await?
        .unwrap();
    assert_eq!(refinery.income, 500.0);

    test.assert_mocks();

    Ok(())
}

/// Expect a failed metadata fetch to be reported without affecting the ledger or other types
#[tokio::test]
async fn isolates_metadata_failure() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_mining_activity(98, 10, MINER_ID, REFINERY_ID)
        .with_mining_activity(99, 10, MINER_ID, REFINERY_ID)
        .with_type_error_endpoint(98, 404, 1)
        .with_type_endpoint(99, 1)
        .with_mail_endpoint(MINER_ID, 201, 1)
        .build()
        .await?;

    let result = invoice_job(&test).run_on(run_date()).await;

    assert!(result.is_ok());
    let report = result.unwrap().unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.metadata.stored, vec![99]);
    assert_eq!(report.metadata.failed.len(), 1);
    assert_eq!(report.metadata.failed[0].type_id, 98);

    let rates = TaxRateRepository::new(&test.db).get_all().await?;
    assert_eq!(rates.len(), 2);
    assert_eq!(
        TaxRateRepository::new(&test.db)
            .get_type_ids_without_metadata()
            .await?,
        vec![98]
    );
    assert_eq!(report.settlement.dispatched.len(), 1);

    test.assert_mocks();

    Ok(())
}

/// Expect types that already have metadata to never be fetched again
#[tokio::test]
async fn does_not_refetch_known_metadata() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_inv_type(34)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .with_type_endpoint(34, 0)
        .with_mail_endpoint(MINER_ID, 201, 1)
        .build()
        .await?;

    let result = invoice_job(&test).run_on(run_date()).await;

    assert!(result.is_ok());
    let report = result.unwrap().unwrap();
    assert!(report.metadata.stored.is_empty());
    assert!(report.metadata.failed.is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expect Ok(None) without any changes while another run holds the lock
#[tokio::test]
async fn skips_run_while_lock_is_held() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .with_mail_endpoint(MINER_ID, 201, 0)
        .build()
        .await?;

    let lock = RunLock::local();
    let job = invoice_job_with_lock(&test, lock.clone());

    let guard = lock.try_acquire().await.unwrap();
    let result = job.run_on(run_date()).await;

    assert!(guard.is_some());
    assert!(matches!(result, Ok(None)));
    assert_eq!(
        MiningActivityRepository::new(&test.db)
            .get_unprocessed()
            .await?
            .len(),
        1
    );

    test.assert_mocks();

    Ok(())
}

/// Expect TemplateNotFound after the ledger was already updated
///
/// Ingestion commits before settlement, a missing template only prevents invoicing.
#[tokio::test]
async fn fails_settlement_without_template() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_miner(MINER_ID, None, 0.0)
        .with_refinery(REFINERY_ID, SOLAR_SYSTEM_ID, 0.0)
        .with_tax_rate(34, 5.0, 10.0)
        .with_inv_type(34)
        .with_mining_activity(34, 1000, MINER_ID, REFINERY_ID)
        .build()
        .await?;

    let job = invoice_job(&test);
    let result = job.run_on(run_date()).await;

    assert!(matches!(
        result,
        Err(Error::LedgerError(LedgerError::TemplateNotFound(_)))
    ));
    let miner = MinerRepository::new(&test.db).get_by_eve_id(MINER_ID).await?.unwrap();
    assert_eq!(miner.amount_owed, 500.0);

    // Lock was released on the error path, so the next run gets as far as settlement again
    assert!(matches!(
        job.run_on(run_date()).await,
        Err(Error::LedgerError(LedgerError::TemplateNotFound(_)))
    ));

    Ok(())
}
