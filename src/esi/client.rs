//! Minimal HTTP client for the ESI endpoints the invoice job uses.

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    error::Error,
    esi::{
        model::{MailMessage, MailRequest, TypeInfo},
        Messenger, TypeMetadataProvider,
    },
};

const DEFAULT_ESI_URL: &str = "https://esi.evetech.net/latest";
const DEFAULT_DATASOURCE: &str = "tranquility";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Character that invoices are mailed from, together with its ESI access token
#[derive(Clone)]
struct MailSender {
    character_id: i64,
    access_token: String,
}

/// ESI client implementing [`TypeMetadataProvider`] and [`Messenger`].
///
/// Cloning is cheap, the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct EsiClient {
    http: reqwest::Client,
    esi_url: String,
    datasource: String,
    mail_sender: Option<MailSender>,
}

impl EsiClient {
    pub fn builder() -> EsiClientBuilder {
        EsiClientBuilder::default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.esi_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TypeMetadataProvider for EsiClient {
    async fn get_type(&self, type_id: i64) -> Result<TypeInfo, Error> {
        tracing::debug!("Fetching type information for type ID {} from ESI", type_id);

        let type_info = self
            .http
            .get(self.url(&format!("/universe/types/{}/", type_id)))
            .query(&[("datasource", self.datasource.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<TypeInfo>()
            .await?;

        Ok(type_info)
    }
}

#[async_trait]
impl Messenger for EsiClient {
    async fn send_mail(&self, mail: &MailMessage) -> Result<(), Error> {
        let Some(sender) = self.mail_sender.as_ref() else {
            return Err(Error::InternalError(
                "ESI client was built without a mail sender".to_string(),
            ));
        };

        self.http
            .post(self.url(&format!("/characters/{}/mail/", sender.character_id)))
            .query(&[("datasource", self.datasource.as_str())])
            .bearer_auth(&sender.access_token)
            .json(&MailRequest::from(mail))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Builder for [`EsiClient`]
pub struct EsiClientBuilder {
    esi_url: String,
    datasource: String,
    user_agent: Option<String>,
    timeout: Duration,
    mail_sender: Option<MailSender>,
}

impl Default for EsiClientBuilder {
    fn default() -> Self {
        Self {
            esi_url: DEFAULT_ESI_URL.to_string(),
            datasource: DEFAULT_DATASOURCE.to_string(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            mail_sender: None,
        }
    }
}

impl EsiClientBuilder {
    pub fn esi_url(mut self, esi_url: &str) -> Self {
        self.esi_url = esi_url.to_string();
        self
    }

    pub fn datasource(mut self, datasource: &str) -> Self {
        self.datasource = datasource.to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Timeout applied to every request, including connection setup
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mail_sender(mut self, character_id: i64, access_token: &str) -> Self {
        self.mail_sender = Some(MailSender {
            character_id,
            access_token: access_token.to_string(),
        });
        self
    }

    pub fn build(self) -> Result<EsiClient, Error> {
        let mut http = reqwest::Client::builder().timeout(self.timeout);

        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }

        Ok(EsiClient {
            http: http.build()?,
            esi_url: self.esi_url,
            datasource: self.datasource,
            mail_sender: self.mail_sender,
        })
    }
}
