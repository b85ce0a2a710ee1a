//! Core types, traits, errors, config, and tracing for Galaksio.
//!
//! Everything here is shared by the detector (`galaksio-pairing`) and the
//! Galaxy-facing layer (`galaksio-galaxy`).

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
