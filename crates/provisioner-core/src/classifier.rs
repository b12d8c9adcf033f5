//! Provider error classification
//!
//! Maps a provider error code to a retry/abort decision. Each resource kind
//! has its own table of known-transient codes; anything outside the table is
//! treated as non-retryable.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// Retry decision for a single provider error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub retryable: bool,
    pub reason: String,
}

impl ErrorClassification {
    fn retry(reason: String) -> Self {
        Self {
            retryable: true,
            reason,
        }
    }

    fn abort(reason: String) -> Self {
        Self {
            retryable: false,
            reason,
        }
    }
}

/// Placeholder substituted with the instance type in reason templates
const INSTANCE_TYPE_PLACEHOLDER: &str = "{instance_type}";

const INSTANCE_RETRY_CODES: &[(&str, &str)] = &[
    ("IdempotentParameterMismatch", "Safe to retry immediately"),
    (
        "InsufficientInstanceCapacity",
        "Insufficient capacity for {instance_type}",
    ),
    ("RequestLimitExceeded", "AWS API request limit exceeded"),
    ("ServiceUnavailable", "EC2 service unavailable"),
    ("Unsupported", "Instance type {instance_type} not supported"),
];

const ENDPOINT_RETRY_CODES: &[(&str, &str)] = &[
    ("ThrottlingException", "API request throttled"),
    ("ServiceUnavailable", "SageMaker service unavailable"),
    ("InternalFailure", "Internal SageMaker service error"),
];

/// Known-transient codes for a resource kind, as `(code, reason template)`
pub fn retry_table(kind: ResourceKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ResourceKind::Instance => INSTANCE_RETRY_CODES,
        ResourceKind::EndpointConfig | ResourceKind::Endpoint => ENDPOINT_RETRY_CODES,
    }
}

/// Classify `code` against the table for `kind`.
///
/// `instance_type` fills the `{instance_type}` placeholder of reasons that
/// mention it; when absent the placeholder is replaced with "requested type".
pub fn classify(kind: ResourceKind, code: &str, instance_type: Option<&str>) -> ErrorClassification {
    match retry_table(kind).iter().find(|(known, _)| *known == code) {
        Some((_, template)) => {
            let reason = template.replace(
                INSTANCE_TYPE_PLACEHOLDER,
                instance_type.unwrap_or("requested type"),
            );
            ErrorClassification::retry(reason)
        }
        None => ErrorClassification::abort(format!("Unhandled error code: {}", code)),
    }
}
