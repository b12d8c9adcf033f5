//! SDK error conversion

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use provisioner_core::ApiError;

/// Code used when the SDK error carries no service error code
/// (dispatch failures, timeouts, unparseable responses)
pub const UNKNOWN_CODE: &str = "Unknown";

/// Flatten an SDK error into the provider-neutral [`ApiError`]
pub(crate) fn api_error<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let service = err.as_service_error();
    let code = service.and_then(ProvideErrorMetadata::code);
    let message = service.and_then(ProvideErrorMetadata::message);
    api_error_from_parts(code, message, || DisplayErrorContext(&err).to_string())
}

pub(crate) fn api_error_from_parts(
    code: Option<&str>,
    message: Option<&str>,
    describe: impl FnOnce() -> String,
) -> ApiError {
    let code = code.filter(|c| !c.is_empty()).unwrap_or(UNKNOWN_CODE);
    let message = match message {
        Some(m) => m.to_string(),
        None => describe(),
    };
    ApiError::new(code, message)
}

/// Errors raised while building a request locally, before anything is sent
pub(crate) fn build_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::new("RequestBuildError", err.to_string())
}
