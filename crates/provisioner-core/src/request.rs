//! Provisioning requests and their results

use crate::error::{ProvisionError, Result};
use crate::kind::{ResourceKind, ResourceParameters};
use crate::retry::RetryPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What to provision and how hard to try
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionRequest {
    kind: ResourceKind,
    desired_count: u32,
    retry: RetryPolicy,
    parameters: ResourceParameters,
}

impl ProvisionRequest {
    pub fn new(
        parameters: ResourceParameters,
        desired_count: u32,
        retry: RetryPolicy,
    ) -> Result<Self> {
        if desired_count < 1 {
            return Err(ProvisionError::InvalidRequest(format!(
                "{} count must be at least 1",
                parameters.kind()
            )));
        }

        Ok(Self {
            kind: parameters.kind(),
            desired_count,
            retry,
            parameters,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn desired_count(&self) -> u32 {
        self.desired_count
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn parameters(&self) -> &ResourceParameters {
        &self.parameters
    }
}

/// A resource the provider accepted
///
/// Ownership passes to the provider as soon as it exists; nothing here rolls
/// it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedResource {
    /// Provider-assigned ID (instance ID, endpoint ARN, ...)
    pub id: String,

    pub kind: ResourceKind,

    /// Parameters the resource was created with
    pub parameters: ResourceParameters,

    pub created_at: DateTime<Utc>,
}

impl ProvisionedResource {
    pub fn new(id: impl Into<String>, parameters: ResourceParameters) -> Self {
        Self {
            id: id.into(),
            kind: parameters.kind(),
            parameters,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::EndpointParameters;
    use std::collections::BTreeMap;

    fn endpoint_params() -> ResourceParameters {
        ResourceParameters::Endpoint(EndpointParameters {
            endpoint_name: "m-endpoint".into(),
            config_name: "m-config".into(),
            tags: BTreeMap::new(),
        })
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = ProvisionRequest::new(endpoint_params(), 0, RetryPolicy::default()).unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidRequest(_)));
    }

    #[test]
    fn test_kind_follows_parameters() {
        let req = ProvisionRequest::new(endpoint_params(), 1, RetryPolicy::default()).unwrap();
        assert_eq!(req.kind(), ResourceKind::Endpoint);
        assert_eq!(req.desired_count(), 1);
    }
}
