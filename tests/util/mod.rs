use std::{sync::Arc, time::Duration};

use ore_ledger::{
    esi::EsiClient,
    lock::RunLock,
    service::invoice_job::{InvoiceJob, InvoiceJobConfig},
};
use ore_ledger_test_utils::prelude::*;

pub static TEMPLATE_NAME: &str = "weekly_invoice";
pub static TEMPLATE_SUBJECT: &str = "Mining tax {date}";
pub static TEMPLATE_BODY: &str = "Dear {name}, you owe {amount_owed} ISK. {signature}";

/// ESI client pointed at the mock server, mailing from [`TEST_MAIL_SENDER_ID`]
pub fn esi_client(test: &TestContext) -> Arc<EsiClient> {
    let client = EsiClient::builder()
        .esi_url(&test.esi_url())
        .user_agent(TEST_USER_AGENT)
        .mail_sender(TEST_MAIL_SENDER_ID, TEST_ACCESS_TOKEN)
        .build()
        .expect("Failed to build ESI client");

    Arc::new(client)
}

/// Invoice job without retry backoff using the provided lock
pub fn invoice_job_with_lock(test: &TestContext, lock: RunLock) -> InvoiceJob {
    let esi_client = esi_client(test);

    InvoiceJob::new(
        test.db.clone(),
        esi_client.clone(),
        esi_client,
        lock,
        InvoiceJobConfig {
            template_name: TEMPLATE_NAME.to_string(),
            metadata_retry_backoff: Duration::ZERO,
        },
    )
}

pub fn invoice_job(test: &TestContext) -> InvoiceJob {
    invoice_job_with_lock(test, RunLock::local())
}

/// Builder with ledger tables and the weekly invoice template
pub fn ledger_builder() -> TestBuilder {
    TestBuilder::new()
        .with_ledger_tables()
        .with_template(TEMPLATE_NAME, TEMPLATE_SUBJECT, TEMPLATE_BODY)
}
