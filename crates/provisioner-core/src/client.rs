//! Resource client trait definition

use crate::error::ApiResult;
use crate::kind::ResourceParameters;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Provider API surface used by the provisioning loops
///
/// Implementations perform exactly one provider call per method and never
/// retry on their own; retries are the loop's job.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Create a single unit of the resource described by `parameters`,
    /// returning the provider-assigned identifier
    async fn create_unit(&self, parameters: &ResourceParameters) -> ApiResult<String>;

    /// Look up an endpoint configuration by name; `Ok(None)` when it does not exist
    async fn describe_config(&self, name: &str) -> ApiResult<Option<ConfigDescription>>;

    /// Delete an endpoint configuration by name
    async fn delete_config(&self, name: &str) -> ApiResult<()>;
}

/// Remote endpoint configuration as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDescription {
    pub name: String,
}

impl ConfigDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
