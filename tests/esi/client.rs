//! Tests for the ESI client's type lookups and mail delivery.

use mockito::Matcher;
use ore_ledger::{
    error::{retry::ErrorRetryStrategy, Error},
    esi::{
        model::{MailMessage, MailRecipient},
        EsiClient, Messenger, TypeMetadataProvider,
    },
};
use ore_ledger_test_utils::prelude::*;

use crate::util::esi_client;

fn mail(recipient_id: i64) -> MailMessage {
    MailMessage {
        recipients: vec![MailRecipient::character(recipient_id)],
        subject: "Mining tax".to_string(),
        body: "You owe 500.00 ISK".to_string(),
    }
}

/// Expect type information to be parsed from the ESI response
#[tokio::test]
async fn fetches_type_information() -> Result<(), TestError> {
    let test = TestBuilder::new().with_type_endpoint(45490, 1).build().await?;

    let result = esi_client(&test).get_type(45490).await;

    assert!(result.is_ok());
    let type_info = result.unwrap();
    assert_eq!(type_info.name, "Ore 45490");
    assert_eq!(type_info.group_id, 1884);

    test.assert_mocks();

    Ok(())
}

/// Expect a 404 to surface as a permanent HTTP error
#[tokio::test]
async fn unknown_type_is_permanent_error() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_type_error_endpoint(45490, 404, 1)
        .build()
        .await?;

    let result = esi_client(&test).get_type(45490).await;

    assert!(matches!(result, Err(Error::HttpError(_))));
    assert!(matches!(
        result.unwrap_err().to_retry_strategy(),
        ErrorRetryStrategy::Fail
    ));

    test.assert_mocks();

    Ok(())
}

/// Expect a malformed body to fail as a permanent decode error
#[tokio::test]
async fn malformed_type_is_permanent_error() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/universe/types/45490/")
                .match_query(Matcher::Any)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"name": 45490}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = esi_client(&test).get_type(45490).await;

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err().to_retry_strategy(),
        ErrorRetryStrategy::Fail
    ));

    test.assert_mocks();

    Ok(())
}

/// Expect mail to be posted as the sender with its access token and the datasource
#[tokio::test]
async fn sends_mail_as_sender() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock(
                    "POST",
                    format!("/characters/{}/mail/", TEST_MAIL_SENDER_ID).as_str(),
                )
                .match_query(Matcher::UrlEncoded(
                    "datasource".to_string(),
                    "tranquility".to_string(),
                ))
                .match_header(
                    "authorization",
                    format!("Bearer {}", TEST_ACCESS_TOKEN).as_str(),
                )
                .match_body(Matcher::PartialJsonString(
                    r#"{"approved_cost":0,"subject":"Mining tax","recipients":[{"recipient_id":1,"recipient_type":"character"}]}"#
                        .to_string(),
                ))
                .with_status(201)
                .with_body("1337")
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = esi_client(&test).send_mail(&mail(1)).await;

    assert!(result.is_ok());

    test.assert_mocks();

    Ok(())
}

/// Expect an InternalError when sending mail without a configured sender
#[tokio::test]
async fn requires_mail_sender() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let client = EsiClient::builder()
        .esi_url(&test.esi_url())
        .build()
        .expect("Failed to build ESI client");
    let result = client.send_mail(&mail(1)).await;

    assert!(matches!(result, Err(Error::InternalError(_))));

    Ok(())
}
