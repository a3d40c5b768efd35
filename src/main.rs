use std::sync::Arc;

use ore_ledger::{
    config::Config,
    error::{config::ConfigError, Error},
    scheduler::Scheduler,
    service::summary::LedgerSummaryService,
    startup,
    util::format::format_isk,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await?;

    // `--summary` logs the ledger overview for the configured alliance and exits
    if std::env::args().any(|arg| arg == "--summary") {
        let alliance_id = config
            .alliance_id
            .ok_or_else(|| ConfigError::MissingEnvVar("EVE_ALLIANCE_ID".to_string()))?;
        let summary = LedgerSummaryService::new(&db, alliance_id).summary().await?;

        tracing::info!(
            "Alliance {} owes {} ISK across {} debtor(s), refineries earned {} ISK, {} ninja miner(s)",
            alliance_id,
            format_isk(summary.total_amount_owed),
            summary.debtors.len(),
            format_isk(summary.total_income),
            summary.ninjas.len()
        );
        if let Some(top_payer) = summary.top_payer {
            tracing::info!(
                "Top payer: {} ({} ISK)",
                top_payer.entry.name,
                format_isk(top_payer.total)
            );
        }
        if let Some(top_system) = summary.top_system {
            tracing::info!(
                "Top system: {} ({} ISK)",
                top_system
                    .entry
                    .name
                    .unwrap_or_else(|| top_system.entry.solar_system_id.to_string()),
                format_isk(top_system.total)
            );
        }
        return Ok(());
    }

    let job = Arc::new(startup::build_invoice_job(&config, db).await?);

    // `--once` runs the job immediately and exits, used for manual and ad-hoc runs
    if std::env::args().any(|arg| arg == "--once") {
        match job.run().await? {
            Some(report) => tracing::info!("{}", report),
            None => tracing::warn!("Another invoice run holds the lock, nothing was done"),
        }
        return Ok(());
    }

    let mut sched = Scheduler::new(job).await?.start(&config.invoice_cron).await?;

    tracing::info!("Waiting for scheduled invoice runs, press Ctrl+C to stop");
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
    sched.shutdown().await?;

    Ok(())
}
