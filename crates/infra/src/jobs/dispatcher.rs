//! Task dispatcher: the orchestrator's fire-and-forget boundary.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use super::types::Job;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("job queue is closed")]
    QueueClosed,
}

/// Accepts a job for asynchronous, at-least-once processing.
///
/// Dispatch is synchronous enqueue only; execution (and its retry policy)
/// belongs entirely to the worker on the other side of the queue.
pub trait TaskDispatcher: Send + Sync {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError>;
}

impl<D> TaskDispatcher for Arc<D>
where
    D: TaskDispatcher + ?Sized,
{
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        (**self).dispatch(job)
    }
}

/// Channel-backed dispatcher: an explicit queue handle rather than a global
/// job-queue singleton, so tests can hold the receiving end.
#[derive(Debug, Clone)]
pub struct QueueDispatcher {
    tx: mpsc::UnboundedSender<Job>,
}

impl QueueDispatcher {
    /// Create the dispatcher plus the receiver a worker should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TaskDispatcher for QueueDispatcher {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        tracing::debug!(job_id = %job.id, kind = %job.kind, "job dispatched");
        self.tx.send(job).map_err(|_| DispatchError::QueueClosed)
    }
}
