use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    error::Error,
    esi::EsiClient,
    lock::RunLock,
    service::invoice_job::{InvoiceJob, InvoiceJobConfig},
};

/// Initialize tracing from the `RUST_LOG` environment variable, defaulting to `info`
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the ESI client used for type lookups and invoice mail
pub fn build_esi_client(config: &Config) -> Result<EsiClient, Error> {
    EsiClient::builder()
        .esi_url(&config.esi_url)
        .datasource(&config.esi_datasource)
        .user_agent(&config.user_agent)
        .timeout(config.http_timeout)
        .mail_sender(config.mail_sender_character_id, &config.mail_access_token)
        .build()
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Redis lock when Valkey is configured, otherwise a lock local to this process
pub async fn build_run_lock(config: &Config) -> Result<RunLock, Error> {
    use fred::prelude::*;

    let Some(valkey_url) = config.valkey_url.as_deref() else {
        tracing::info!("VALKEY_URL is not set, using an in-process run lock");
        return Ok(RunLock::local());
    };

    let redis_config = fred::prelude::Config::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 2)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(RunLock::redis(pool))
}

/// Wire the invoice job up to its collaborators
pub async fn build_invoice_job(
    config: &Config,
    db: DatabaseConnection,
) -> Result<InvoiceJob, Error> {
    let esi_client = Arc::new(build_esi_client(config)?);
    let lock = build_run_lock(config).await?;

    Ok(InvoiceJob::new(
        db,
        esi_client.clone(),
        esi_client,
        lock,
        InvoiceJobConfig {
            template_name: config.invoice_template.clone(),
            ..Default::default()
        },
    ))
}
