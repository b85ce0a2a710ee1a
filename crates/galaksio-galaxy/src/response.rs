//! JSON envelope for the HTTP boundary: `{success, error, error_code, data}`.

use std::fmt;

use galaksio_core::errors::GalaksioErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            error_code: None,
            data: Some(data),
        }
    }

    pub fn err<E: GalaksioErrorCode + fmt::Display>(error: &E) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            error_code: Some(error.error_code().to_string()),
            data: None,
        }
    }
}

impl<T, E: GalaksioErrorCode + fmt::Display> From<Result<T, E>> for ApiResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(&error),
        }
    }
}
