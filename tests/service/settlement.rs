//! Tests for InvoiceSettlement::settle.

use chrono::NaiveDate;
use ore_ledger::{
    data::{invoice::InvoiceRepository, miner::MinerRepository, template::TemplateRepository},
    service::settlement::InvoiceSettlement,
};
use ore_ledger_test_utils::prelude::*;

use crate::util::{esi_client, ledger_builder, TEMPLATE_BODY, TEMPLATE_NAME, TEMPLATE_SUBJECT};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
}

/// Expect one rendered invoice per debtor and none for miners without a balance
#[tokio::test]
async fn invoices_each_debtor_independently() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(1, None, 150.0)
        .with_miner(2, None, 80.0)
        .with_miner(3, None, 0.0)
        .with_mail_endpoint(1, 201, 1)
        .with_mail_endpoint(2, 201, 1)
        .with_mail_endpoint(3, 201, 0)
        .build()
        .await?;

    let esi_client = esi_client(&test);
    let settlement = InvoiceSettlement::new(&test.db, esi_client.as_ref(), TEMPLATE_NAME);
    let result = settlement.settle(run_date()).await;

    assert!(result.is_ok());
    let outcome = result.unwrap();
    assert!(outcome.failed.is_empty());
    assert_eq!(outcome.dispatched.len(), 2);

    let first = &outcome.dispatched[0];
    assert_eq!(first.miner_id, 1);
    assert_eq!(first.amount, 150.0);
    assert_eq!(first.mail.subject, "Mining tax 2025-11-02");
    assert_eq!(
        first.mail.body,
        "Dear Miner 1, you owe 150.00 ISK. {signature}"
    );
    assert_eq!(first.mail.recipients[0].recipient_id, 1);

    let second = &outcome.dispatched[1];
    assert_eq!(second.miner_id, 2);
    assert_eq!(second.mail.body, "Dear Miner 2, you owe 80.00 ISK. {signature}");

    // Rendering never writes back to the stored template
    let template = TemplateRepository::new(&test.db)
        .get_by_name(TEMPLATE_NAME)
        .await?
        .unwrap();
    assert_eq!(template.subject, TEMPLATE_SUBJECT);
    assert_eq!(template.body, TEMPLATE_BODY);

    assert!(InvoiceRepository::new(&test.db)
        .get_by_miner_id(3)
        .await?
        .is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expect a failed mail to only affect its own debtor
#[tokio::test]
async fn isolates_dispatch_failure() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(1, None, 150.0)
        .with_miner(2, None, 80.0)
        .with_mail_endpoint(1, 500, 1)
        .with_mail_endpoint(2, 201, 1)
        .build()
        .await?;

    let esi_client = esi_client(&test);
    let settlement = InvoiceSettlement::new(&test.db, esi_client.as_ref(), TEMPLATE_NAME);
    let result = settlement.settle(run_date()).await;

    assert!(result.is_ok());
    let outcome = result.unwrap();
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].miner_id, 1);
    assert_eq!(outcome.dispatched.len(), 1);
    assert_eq!(outcome.dispatched[0].miner_id, 2);

    let invoices = InvoiceRepository::new(&test.db);
    assert!(invoices.get_by_miner_id(1).await?.is_empty());
    assert_eq!(invoices.get_by_miner_id(2).await?.len(), 1);

    // Balances are left as they were
    let miners = MinerRepository::new(&test.db);
    assert_eq!(miners.get_by_eve_id(1).await?.unwrap().amount_owed, 150.0);
    assert_eq!(miners.get_by_eve_id(2).await?.unwrap().amount_owed, 80.0);

    test.assert_mocks();

    Ok(())
}

/// Expect large balances to be rendered with thousands separators
#[tokio::test]
async fn formats_amount_owed() -> Result<(), TestError> {
    let test = ledger_builder()
        .with_miner(1, None, 1_234_567.5)
        .with_mail_endpoint(1, 201, 1)
        .build()
        .await?;

    let esi_client = esi_client(&test);
    let settlement = InvoiceSettlement::new(&test.db, esi_client.as_ref(), TEMPLATE_NAME);
    let result = settlement.settle(run_date()).await;

    assert!(result.is_ok());
    let outcome = result.unwrap();
    assert_eq!(
        outcome.dispatched[0].mail.body,
        "Dear Miner 1, you owe 1,234,567.50 ISK. {signature}"
    );

    test.assert_mocks();

    Ok(())
}

/// Expect nothing to be sent when nobody owes anything
#[tokio::test]
async fn sends_nothing_without_debtors() -> Result<(), TestError> {
    let test = ledger_builder().with_miner(1, None, 0.0).build().await?;

    let esi_client = esi_client(&test);
    let settlement = InvoiceSettlement::new(&test.db, esi_client.as_ref(), TEMPLATE_NAME);
    let result = settlement.settle(run_date()).await;

    assert!(result.is_ok());
    let outcome = result.unwrap();
    assert!(outcome.dispatched.is_empty());
    assert!(outcome.failed.is_empty());

    Ok(())
}
