//! Mails an invoice to every miner with an outstanding balance.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    data::{invoice::InvoiceRepository, miner::MinerRepository, template::TemplateRepository},
    error::{ledger::LedgerError, Error},
    esi::{
        model::{MailMessage, MailRecipient},
        Messenger,
    },
    model::report::{DispatchedInvoice, FailedDispatch, SettlementOutcome},
    util::{format::format_isk, template::MailTemplate},
};

pub struct InvoiceSettlement<'a> {
    db: &'a DatabaseConnection,
    messenger: &'a dyn Messenger,
    template_name: &'a str,
}

impl<'a> InvoiceSettlement<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        messenger: &'a dyn Messenger,
        template_name: &'a str,
    ) -> Self {
        Self {
            db,
            messenger,
            template_name,
        }
    }

    /// Sends an invoice to each debtor and records it once the mail was accepted
    ///
    /// Debtors are processed in EVE ID order. A failed send is recorded and the remaining
    /// debtors are still invoiced. Balances are left untouched, they only decrease through
    /// recorded payments.
    ///
    /// # Returns
    /// - `Ok(SettlementOutcome)` - Dispatched and failed invoices
    /// - `Err(LedgerError::TemplateNotFound)` - The configured template doesn't exist
    /// - `Err(Error::DbErr)` - Debtors could not be loaded
    pub async fn settle(&self, run_date: NaiveDate) -> Result<SettlementOutcome, Error> {
        let template: MailTemplate = TemplateRepository::new(self.db)
            .get_by_name(self.template_name)
            .await?
            .ok_or_else(|| LedgerError::TemplateNotFound(self.template_name.to_string()))?
            .into();

        let debtors = MinerRepository::new(self.db).get_debtors().await?;
        let invoice_repo = InvoiceRepository::new(self.db);
        let date = run_date.format("%Y-%m-%d").to_string();

        let mut outcome = SettlementOutcome::default();

        for debtor in debtors {
            let amount_owed = format_isk(debtor.amount_owed);
            let rendered = template.render(&[
                ("date", date.as_str()),
                ("name", debtor.name.as_str()),
                ("amount_owed", amount_owed.as_str()),
            ]);

            let mail = MailMessage {
                recipients: vec![MailRecipient::character(debtor.eve_id)],
                subject: rendered.subject,
                body: rendered.body,
            };

            if let Err(e) = self.messenger.send_mail(&mail).await {
                tracing::error!(
                    "Failed to send invoice of {} ISK to miner {}: {}",
                    amount_owed,
                    debtor.eve_id,
                    e
                );
                outcome.failed.push(FailedDispatch {
                    miner_id: debtor.eve_id,
                    amount: debtor.amount_owed,
                    error: e.to_string(),
                });
                continue;
            }

            match invoice_repo.create(debtor.eve_id, debtor.amount_owed).await {
                Ok(invoice) => {
                    tracing::info!("Sent invoice of {} ISK to {}", amount_owed, debtor.name);
                    outcome.dispatched.push(DispatchedInvoice {
                        invoice_id: invoice.id,
                        miner_id: debtor.eve_id,
                        amount: debtor.amount_owed,
                        mail,
                    });
                }
                Err(e) => {
                    // Mail already went out, only the ledger record is missing
                    tracing::error!(
                        "Invoice mail sent to miner {} but recording it failed: {}",
                        debtor.eve_id,
                        e
                    );
                    outcome.failed.push(FailedDispatch {
                        miner_id: debtor.eve_id,
                        amount: debtor.amount_owed,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}
