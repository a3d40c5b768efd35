//! Cron scheduler running the invoice job.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::Error, model::report::InvoiceRunReport, service::invoice_job::InvoiceJob};

/// Job scheduler running the invoice job on a cron schedule.
pub struct Scheduler {
    job: Arc<InvoiceJob>,
    sched: JobScheduler,
}

impl Scheduler {
    pub async fn new(job: Arc<InvoiceJob>) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { job, sched })
    }

    /// Registers the invoice job and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(JobScheduler)` - Running scheduler, call `shutdown` on it to stop scheduling
    /// - `Err(Error::SchedulerError)` - Invalid cron expression or the scheduler failed to start
    pub async fn start(mut self, cron: &str) -> Result<JobScheduler, Error> {
        self.schedule_job(cron, "invoice", |job: Arc<InvoiceJob>| async move {
            job.run().await
        })
        .await?;

        self.sched.start().await?;

        tracing::info!("Invoice job scheduled with cron expression {:?}", cron);

        Ok(self.sched)
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution the job logs the run report (on success), a skipped run when another run
    /// holds the lock, or the error that aborted the run.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(Arc<InvoiceJob>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Option<InvoiceRunReport>, Error>>
            + Send
            + 'static,
    {
        let job = self.job.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let job = job.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(job).await {
                        Ok(Some(report)) => tracing::info!("Finished {} run: {}", name, report),
                        Ok(None) => tracing::debug!("Skipped {} run, lock is held", name),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
