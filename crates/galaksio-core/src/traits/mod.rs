//! Trait seams for Galaksio.

pub mod cancellation;
pub mod galaxy_api;

pub use cancellation::{Cancellable, CancellationToken};
pub use galaxy_api::{GalaxyApi, GalaxyVersion};
