//! Bounded fixed-interval polling for asynchronous providers
//!
//! A submitted task moves `pending -> {completed, failed}`; the local
//! bound adds `timed-out`. Fixed-delay polling (no backoff) is a
//! deliberate choice: asset seeding is low-value and low-frequency, and
//! bounding both the attempt count and the interval guarantees the
//! workflow never hangs on an unresponsive provider.

use crate::provider::ProviderError;
use std::time::Duration;
use thiserror::Error;

/// A provider-issued handle for a submitted generation task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub id: String,
}

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One observation of a task's remote status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPoll {
    /// Not terminal yet; keep polling
    Pending,
    /// Terminal success; the result payload lives at this URL
    Completed { url: String },
    /// Terminal provider-reported failure
    Failed { message: String },
    /// Unparseable or transport-failed status response; treated as
    /// transient and never aborts the loop early
    Malformed,
}

/// Why polling stopped without a result
#[derive(Debug, Clone, Error)]
pub enum PollError {
    #[error("timed out after {attempts} poll attempts")]
    TimedOut { attempts: u32 },

    #[error("task failed: {0}")]
    Failed(String),
}

impl From<PollError> for ProviderError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::TimedOut { attempts } => ProviderError::PollTimeout { attempts },
            PollError::Failed(msg) => ProviderError::TaskFailed(msg),
        }
    }
}

/// Poll a task until it reaches a terminal state or the attempt bound
/// is exhausted, sleeping `interval` before every attempt.
///
/// `fetch` performs one status observation; it is generic so providers
/// can supply their own wire format and tests can count invocations.
pub fn poll_task<F>(
    handle: &TaskHandle,
    max_attempts: u32,
    interval: Duration,
    mut fetch: F,
) -> Result<String, PollError>
where
    F: FnMut(&str) -> TaskPoll,
{
    for _ in 0..max_attempts {
        std::thread::sleep(interval);

        match fetch(&handle.id) {
            TaskPoll::Completed { url } => return Ok(url),
            TaskPoll::Failed { message } => return Err(PollError::Failed(message)),
            TaskPoll::Pending | TaskPoll::Malformed => {}
        }
    }

    Err(PollError::TimedOut {
        attempts: max_attempts,
    })
}
