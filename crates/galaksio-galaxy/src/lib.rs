//! Galaxy-facing layer for paired-read handling.
//!
//! - [`transport`]: blocking HTTP client for Galaxy's REST API, with retry
//!   and backoff, implementing [`GalaxyApi`](galaksio_core::traits::GalaxyApi).
//! - [`orchestrator`]: creates collections for every confident pair.
//! - [`service`]: the operations exposed to the web front end, with a
//!   per-history detection cache.

pub mod errors;
pub mod orchestrator;
pub mod response;
pub mod service;
pub mod transport;

pub use errors::ServiceError;
pub use orchestrator::{AutoPairOrchestrator, AutoPairReport, GroupOutcome};
pub use response::ApiResponse;
pub use service::{AutoPairCounts, AutoPairSummary, PairingService};
pub use transport::{GalaxyClient, GalaxyClientConfig, RetryPolicy};
