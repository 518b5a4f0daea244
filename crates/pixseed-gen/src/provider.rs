//! Provider trait and error taxonomy

use pixseed_catalog::AssetSpec;
use std::fmt;
use thiserror::Error;

/// How a provider delivers its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    /// One request/response cycle yields the bytes or a direct URL
    Synchronous,
    /// Submit-then-poll before bytes are available
    Asynchronous,
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolKind::Synchronous => write!(f, "synchronous"),
            ProtocolKind::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    NoApiKey,
}

/// Errors a single provider attempt can produce.
///
/// All of these are recovered by falling back to the next provider in
/// the configured order; none aborts the run.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("missing or rejected credentials")]
    Unauthenticated,

    #[error("rate limited by provider")]
    RateLimited,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("task polling timed out after {attempts} attempts")]
    PollTimeout { attempts: u32 },

    #[error("provider reported task failure: {0}")]
    TaskFailed(String),

    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Trait implemented by each acquisition provider.
///
/// A provider performs one unit of work: produce the bytes for an
/// `AssetSpec`. Providers never write files; placement on disk belongs
/// to the orchestrator so fallback logic stays isolated from I/O.
pub trait AcquireProvider: Send {
    /// Provider name (e.g. "picsum", "openai", "lovart", "local")
    fn name(&self) -> &str;

    /// Whether this provider uses a synchronous or submit-then-poll protocol
    fn protocol(&self) -> ProtocolKind;

    /// Check whether the provider is usable (credentials present)
    fn health_check(&self) -> ProviderStatus;

    /// Acquire the image bytes for a spec
    fn acquire(&self, spec: &AssetSpec) -> Result<Vec<u8>, ProviderError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// In-test provider that records how many times it was consulted.
    /// The counter is shared so tests keep a handle after boxing.
    pub(crate) struct StubProvider {
        name: String,
        payload: Option<Vec<u8>>,
        calls: Arc<AtomicU32>,
    }

    impl StubProvider {
        pub fn succeeding(name: &str, payload: &[u8]) -> Self {
            Self {
                name: name.to_string(),
                payload: Some(payload.to_vec()),
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        pub fn failing(name: &str) -> Self {
            Self {
                name: name.to_string(),
                payload: None,
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        pub fn counter(&self) -> Arc<AtomicU32> {
            Arc::clone(&self.calls)
        }
    }

    impl AcquireProvider for StubProvider {
        fn name(&self) -> &str {
            &self.name
        }

        fn protocol(&self) -> ProtocolKind {
            ProtocolKind::Synchronous
        }

        fn health_check(&self) -> ProviderStatus {
            ProviderStatus::Available
        }

        fn acquire(&self, _spec: &AssetSpec) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.payload {
                Some(bytes) => Ok(bytes.clone()),
                None => Err(ProviderError::Http(500)),
            }
        }
    }
}
