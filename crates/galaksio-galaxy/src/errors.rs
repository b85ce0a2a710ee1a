//! Service-level errors.

use galaksio_core::errors::error_code::{self, GalaksioErrorCode};
use galaksio_core::errors::{ConfigError, DetectionError, GalaxyError};

/// Errors returned by [`PairingService`](crate::PairingService) operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Galaxy(#[from] GalaxyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("A collection was already created for group {group_id}")]
    CollectionExists { group_id: String },

    #[error("Operation cancelled")]
    Cancelled,
}

impl GalaksioErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Detection(e) => e.error_code(),
            Self::Galaxy(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::CollectionExists { .. } => error_code::COLLECTION_EXISTS,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
