//! Tests for TypeMetadataService.

use std::time::Duration;

use ore_ledger::{data::inv_type::InvTypeRepository, service::type_metadata::TypeMetadataService};
use ore_ledger_test_utils::prelude::*;

use crate::util::esi_client;

/// Expect a transient ESI error to be retried and the second response to be stored
#[tokio::test]
async fn retries_server_errors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_type_error_endpoint(45490, 503, 1)
        .with_type_endpoint(45490, 1)
        .build()
        .await?;

    let service = TypeMetadataService::new(test.db.clone(), esi_client(&test))
        .with_retry_backoff(Duration::ZERO);
    let result = service.fetch_and_store(45490).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().name, "Ore 45490");

    test.assert_mocks();

    Ok(())
}

/// Expect a client error to fail without retrying
#[tokio::test]
async fn does_not_retry_client_errors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_type_error_endpoint(45490, 404, 1)
        .build()
        .await?;

    let service = TypeMetadataService::new(test.db.clone(), esi_client(&test))
        .with_retry_backoff(Duration::ZERO);
    let result = service.fetch_and_store(45490).await;

    assert!(result.is_err());
    assert!(InvTypeRepository::new(&test.db)
        .get_by_type_id(45490)
        .await?
        .is_none());

    test.assert_mocks();

    Ok(())
}

/// Expect only taxed types without metadata to be fetched
#[tokio::test]
async fn backfills_missing_metadata() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_tax_rate(34, 5.0, 10.0)
        .with_tax_rate(35, 8.0, 10.0)
        .with_inv_type(34)
        .with_type_endpoint(34, 0)
        .with_type_endpoint(35, 1)
        .build()
        .await?;

    let service = TypeMetadataService::new(test.db.clone(), esi_client(&test))
        .with_retry_backoff(Duration::ZERO);
    let result = service.backfill_missing().await;

    assert!(result.is_ok());
    let backfill = result.unwrap();
    assert_eq!(backfill.stored, vec![35]);
    assert!(backfill.failed.is_empty());

    test.assert_mocks();

    Ok(())
}
