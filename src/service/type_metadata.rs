//! Display metadata for ore types, fetched from ESI.

use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{
    data::{inv_type::InvTypeRepository, tax_rate::TaxRateRepository},
    error::Error,
    esi::{model::TypeInfo, TypeMetadataProvider},
    model::report::{FailedMetadataFetch, MetadataBackfill},
    service::retry::RetryContext,
};

pub struct TypeMetadataService {
    db: DatabaseConnection,
    provider: Arc<dyn TypeMetadataProvider>,
    retry_backoff: Duration,
}

impl TypeMetadataService {
    pub fn new(db: DatabaseConnection, provider: Arc<dyn TypeMetadataProvider>) -> Self {
        Self {
            db,
            provider,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Backoff before the first retry of a failed fetch
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Fetches type information from ESI and stores it
    ///
    /// Transient failures are retried, fetched data is cached between attempts so a failed
    /// database write doesn't trigger another request.
    pub async fn fetch_and_store(&self, type_id: i64) -> Result<entity::inv_type::Model, Error> {
        let mut ctx: RetryContext<Option<TypeInfo>> =
            RetryContext::new().with_initial_backoff(self.retry_backoff);

        let db = self.db.clone();
        let provider = self.provider.clone();

        ctx.execute_with_retry(&format!("type {} metadata", type_id), move |cache| {
            let db = db.clone();
            let provider = provider.clone();

            Box::pin(async move {
                let type_info = match cache.as_ref() {
                    Some(type_info) => type_info.clone(),
                    None => {
                        let fetched = provider.get_type(type_id).await?;
                        *cache = Some(fetched.clone());
                        fetched
                    }
                };

                let model = InvTypeRepository::new(&db)
                    .upsert(type_id, type_info)
                    .await?;

                Ok(model)
            })
        })
        .await
    }

    /// Fetches metadata for every taxed type that doesn't have any yet
    ///
    /// A failure is recorded per type and never stops the remaining fetches.
    ///
    /// # Returns
    /// - `Ok(MetadataBackfill)` - Types stored and types that failed
    /// - `Err(Error::DbErr)` - Types lacking metadata could not be listed
    pub async fn backfill_missing(&self) -> Result<MetadataBackfill, Error> {
        let missing = TaxRateRepository::new(&self.db)
            .get_type_ids_without_metadata()
            .await?;

        let mut backfill = MetadataBackfill::default();

        for type_id in missing {
            match self.fetch_and_store(type_id).await {
                Ok(model) => {
                    tracing::info!("Stored metadata for ore type {} ({})", type_id, model.name);
                    backfill.stored.push(type_id);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch metadata for ore type {}: {}", type_id, e);
                    backfill.failed.push(FailedMetadataFetch {
                        type_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(backfill)
    }
}
