//! Mail worker: drains the job queue and delivers with retries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use super::mailer::Mailer;
use super::types::{Job, SHARE_EVENT_MAIL, ShareEventMail};

/// Delay between delivery attempts.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Background worker for share-event mail jobs.
///
/// Failures are retried up to the job's `max_attempts`; an exhausted job is
/// logged and dropped. Nothing here ever reports back to the request that
/// dispatched the job.
pub struct MailWorker {
    mailer: Arc<dyn Mailer>,
}

impl MailWorker {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Spawn the worker onto the current runtime. The task ends when the
    /// queue's sending side is dropped.
    pub fn spawn(self, mut rx: mpsc::UnboundedReceiver<Job>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                self.handle(job).await;
            }
        })
    }

    async fn handle(&self, job: Job) {
        if job.kind != SHARE_EVENT_MAIL {
            warn!(job_id = %job.id, kind = %job.kind, "unknown job kind, dropping");
            return;
        }

        let mail: ShareEventMail = match serde_json::from_value(job.payload) {
            Ok(m) => m,
            Err(e) => {
                error!(job_id = %job.id, error = %e, "undecodable job payload, dropping");
                return;
            }
        };

        let attempts = job.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.mailer.send(&mail).await {
                Ok(()) => return,
                Err(e) if attempt < attempts => {
                    warn!(
                        job_id = %job.id,
                        attempt,
                        error = %e,
                        "mail delivery failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    error!(
                        job_id = %job.id,
                        attempts,
                        error = %e,
                        "mail delivery failed, retries exhausted"
                    );
                }
            }
        }
    }
}
