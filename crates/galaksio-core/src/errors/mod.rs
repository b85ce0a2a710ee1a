//! Error handling for Galaksio.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod galaxy_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::GalaksioErrorCode;
pub use galaxy_error::GalaxyError;
