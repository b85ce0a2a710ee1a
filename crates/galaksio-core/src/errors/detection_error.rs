//! Detection errors.

use super::error_code::{self, GalaksioErrorCode};

/// Errors that can occur during paired-read detection.
///
/// Detection either produces a complete result or fails with one of these;
/// an ambiguous mate assignment is a data condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("Invalid input: dataset list is empty")]
    EmptyInput,

    #[error("Invalid input: duplicate dataset id {id}")]
    DuplicateId { id: String },
}

impl GalaksioErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_INPUT
    }
}
