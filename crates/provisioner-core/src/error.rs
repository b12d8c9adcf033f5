//! Provisioning error types

use crate::kind::ResourceKind;
use thiserror::Error;

/// Error returned by a provider API call.
///
/// `code` is the provider's machine-readable error identifier
/// (e.g. `InsufficientInstanceCapacity`); it is what the classifier looks at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Provisioning errors
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    #[error("{kind} creation failed: {source}")]
    Api {
        kind: ResourceKind,
        #[source]
        source: ApiError,
    },

    #[error("Describe failed for {name}: {source}")]
    Describe {
        name: String,
        #[source]
        source: ApiError,
    },
}

impl ProvisionError {
    /// Provider error code, if this error originated from an API call
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ProvisionError::Api { source, .. } | ProvisionError::Describe { source, .. } => {
                Some(source.code.as_str())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
