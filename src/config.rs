//! Application configuration loaded from environment variables.

use std::{str::FromStr, time::Duration};

use crate::error::config::ConfigError;

const DEFAULT_ESI_URL: &str = "https://esi.evetech.net/latest";
const DEFAULT_ESI_DATASOURCE: &str = "tranquility";
const DEFAULT_INVOICE_TEMPLATE: &str = "weekly_invoice";
/// Sundays at 12:00 UTC
const DEFAULT_INVOICE_CRON: &str = "0 0 12 * * Sun";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub contact_email: String,
    pub user_agent: String,
    pub database_url: String,
    /// Enables the Redis run lock when present, otherwise an in-process lock is used
    pub valkey_url: Option<String>,
    pub esi_url: String,
    pub esi_datasource: String,
    /// Character invoices are mailed from
    pub mail_sender_character_id: i64,
    pub mail_access_token: String,
    /// Alliance considered "home" by the ledger summary
    pub alliance_id: Option<i64>,
    pub invoice_template: String,
    pub invoice_cron: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let contact_email = required("CONTACT_EMAIL")?;
        let user_agent = format!(
            "{}/{} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            contact_email
        );

        Ok(Self {
            user_agent,
            contact_email,
            database_url: required("DATABASE_URL")?,
            valkey_url: optional("VALKEY_URL"),
            esi_url: optional("ESI_URL").unwrap_or_else(|| DEFAULT_ESI_URL.to_string()),
            esi_datasource: optional("ESI_DATASOURCE")
                .unwrap_or_else(|| DEFAULT_ESI_DATASOURCE.to_string()),
            mail_sender_character_id: parse(
                "MAIL_SENDER_CHARACTER_ID",
                &required("MAIL_SENDER_CHARACTER_ID")?,
            )?,
            mail_access_token: required("MAIL_ACCESS_TOKEN")?,
            alliance_id: optional("EVE_ALLIANCE_ID")
                .map(|value| parse("EVE_ALLIANCE_ID", &value))
                .transpose()?,
            invoice_template: optional("INVOICE_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_INVOICE_TEMPLATE.to_string()),
            invoice_cron: optional("INVOICE_CRON")
                .unwrap_or_else(|| DEFAULT_INVOICE_CRON.to_string()),
            http_timeout: Duration::from_secs(
                optional("HTTP_TIMEOUT_SECS")
                    .map(|value| parse("HTTP_TIMEOUT_SECS", &value))
                    .transpose()?
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Unset and empty variables are both treated as absent
fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
