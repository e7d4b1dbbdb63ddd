//! Deferred task dispatch: a channel-backed queue plus a retrying mail worker.
//!
//! The orchestrator only sees the queue handle; delivery, retries and
//! dead-letter logging all happen out of the request path.

pub mod dispatcher;
pub mod mailer;
pub mod types;
pub mod worker;

pub use dispatcher::{DispatchError, QueueDispatcher, TaskDispatcher};
pub use mailer::{Mailer, MailerError, TracingMailer};
pub use types::{Job, JobId, SHARE_EVENT_MAIL, ShareEventMail};
pub use worker::MailWorker;
