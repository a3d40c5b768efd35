use serde::{Deserialize, Serialize};

/// Display metadata for an ore type as returned by `/universe/types/{type_id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    Alliance,
    Character,
    Corporation,
    MailingList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailRecipient {
    pub recipient_id: i64,
    pub recipient_type: RecipientType,
}

impl MailRecipient {
    pub fn character(character_id: i64) -> Self {
        Self {
            recipient_id: character_id,
            recipient_type: RecipientType::Character,
        }
    }
}

/// A rendered mail ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub recipients: Vec<MailRecipient>,
    pub subject: String,
    pub body: String,
}

/// Request body for `POST /characters/{character_id}/mail/`
#[derive(Debug, Serialize)]
pub(crate) struct MailRequest<'a> {
    pub approved_cost: i64,
    pub body: &'a str,
    pub recipients: &'a [MailRecipient],
    pub subject: &'a str,
}

impl<'a> From<&'a MailMessage> for MailRequest<'a> {
    fn from(mail: &'a MailMessage) -> Self {
        Self {
            approved_cost: 0,
            body: &mail.body,
            recipients: &mail.recipients,
            subject: &mail.subject,
        }
    }
}
