//! Resource kinds and their creation parameters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of resource a provisioning loop creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Compute instance (EC2)
    Instance,
    /// Managed endpoint configuration (SageMaker)
    EndpointConfig,
    /// Managed model-serving endpoint (SageMaker)
    Endpoint,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Instance => write!(f, "instance"),
            ResourceKind::EndpointConfig => write!(f, "endpoint-config"),
            ResourceKind::Endpoint => write!(f, "endpoint"),
        }
    }
}

/// Creation parameters, one variant per [`ResourceKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceParameters {
    Instance(InstanceParameters),
    EndpointConfig(EndpointConfigParameters),
    Endpoint(EndpointParameters),
}

impl ResourceParameters {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceParameters::Instance(_) => ResourceKind::Instance,
            ResourceParameters::EndpointConfig(_) => ResourceKind::EndpointConfig,
            ResourceParameters::Endpoint(_) => ResourceKind::Endpoint,
        }
    }

    /// Instance type the resource runs on, used in classifier reasons and
    /// notifications
    pub fn instance_type(&self) -> Option<&str> {
        match self {
            ResourceParameters::Instance(p) => Some(&p.instance_type),
            ResourceParameters::EndpointConfig(p) => Some(&p.instance_type),
            ResourceParameters::Endpoint(_) => None,
        }
    }
}

/// Parameters for launching a single compute instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceParameters {
    /// Machine image ID (e.g. "ami-0123456789abcdef0")
    pub image_id: String,

    /// Instance type (e.g. "g5.12xlarge")
    pub instance_type: String,

    /// SSH key pair name
    pub key_name: Option<String>,

    /// VPC subnet ID
    pub subnet_id: Option<String>,

    /// Security group IDs
    #[serde(default)]
    pub security_group_ids: Vec<String>,

    /// Tags applied to the launched instance
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Parameters for creating an endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfigParameters {
    pub config_name: String,
    pub model_name: String,
    pub instance_type: String,
    pub variant_name: String,
    pub initial_instance_count: i32,
    pub initial_variant_weight: f32,
}

/// Parameters for creating an endpoint from an existing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointParameters {
    pub endpoint_name: String,
    pub config_name: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Endpoint configuration name derived from a model name
pub fn config_name_for(model_name: &str) -> String {
    format!("{}-config", model_name)
}

/// Endpoint name derived from a model name
pub fn endpoint_name_for(model_name: &str) -> String {
    format!("{}-endpoint", model_name)
}
