//! Configuration system for Galaksio.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod cache_config;
pub mod galaksio_config;
pub mod galaxy_config;
pub mod pairing_config;
pub mod retry_config;

pub use cache_config::CacheConfig;
pub use galaksio_config::{CliOverrides, GalaksioConfig};
pub use galaxy_config::GalaxyConfig;
pub use pairing_config::PairingConfig;
pub use retry_config::RetryConfig;
