//! Transport layer: Galaxy HTTP client, retry/backoff, and wire types.

pub mod http_client;
pub mod protocol;
pub mod retry;

pub use http_client::{GalaxyClient, GalaxyClientConfig, API_KEY_HEADER};
pub use retry::{Attempted, RetryPolicy};
