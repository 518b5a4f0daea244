//! Pixseed Gen - placeholder image acquisition workflow
//!
//! Provides a pluggable provider framework for populating a directory of
//! placeholder images from remote services (stock photo endpoints, AI
//! image generation APIs) with idempotent skip-if-present behavior,
//! ordered fallback across providers, and a bounded submit-then-poll
//! client for asynchronous providers.

pub mod config;
pub mod net;
pub mod orchestrator;
pub mod poller;
pub mod provider;
pub mod providers;
pub mod runner;

pub use config::PixseedConfig;
pub use orchestrator::{resolve, AcquisitionResult, Outcome};
pub use poller::{poll_task, PollError, TaskHandle, TaskPoll};
pub use provider::{AcquireProvider, ProtocolKind, ProviderError, ProviderStatus};
pub use runner::{run, RunSummary};
