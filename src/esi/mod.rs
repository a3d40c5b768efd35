//! ESI (EVE Swagger Interface) collaborators used by the invoice job.
//!
//! The job only needs two things from ESI: display metadata for ore types and the ability
//! to send in-game mail. Both are expressed as traits so the pipeline can be driven by the
//! real [`EsiClient`] in production and by alternative implementations where needed.

pub mod client;
pub mod model;

pub use client::{EsiClient, EsiClientBuilder};

use async_trait::async_trait;

use crate::{
    error::Error,
    esi::model::{MailMessage, TypeInfo},
};

/// Source of display metadata for ore/resource types.
#[async_trait]
pub trait TypeMetadataProvider: Send + Sync {
    /// Fetch the group, name and description of a type.
    ///
    /// # Returns
    /// - `Ok(TypeInfo)` - Type metadata
    /// - `Err(Error::HttpError)` - Request failed, returned an error status or a malformed body
    async fn get_type(&self, type_id: i64) -> Result<TypeInfo, Error>;
}

/// Delivery channel for invoice notifications.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a single mail to its recipients.
    ///
    /// # Returns
    /// - `Ok(())` - Mail accepted for delivery
    /// - `Err(Error)` - Mail was not sent
    async fn send_mail(&self, mail: &MailMessage) -> Result<(), Error>;
}
