//! Provisioner core
//!
//! Bounded-retry provisioning loops for cloud compute resources, with
//! per-resource-kind error classification.
//!
//! # Workflows
//!
//! - **Instances**: launch N compute instances one at a time
//! - **Endpoint**: create an endpoint configuration, then a model-serving
//!   endpoint from it, deleting the configuration if the endpoint fails
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                provision CLI                     │
//! │           (instances / endpoint)                 │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               provisioner-core                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │ Provisioner (bounded retry loops)         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Classifier  │  │   Reporter   │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ResourceClient │ │   Notifier    │
//! │ (EC2/SageMkr) │ │    (SNS)      │
//! └───────────────┘ └───────────────┘
//! ```

pub mod classifier;
pub mod client;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod instance;
pub mod kind;
pub mod notify;
pub mod provisioner;
pub mod report;
pub mod request;
pub mod retry;

#[cfg(test)]
mod testing;

// Re-exports
pub use classifier::{ErrorClassification, classify, retry_table};
pub use client::{ConfigDescription, ResourceClient};
pub use credentials::{
    CredentialProvider, EnvCredentialProvider, StaticCredentialProvider, StaticCredentials,
};
pub use endpoint::{ConfigLocation, EndpointOutcome, EndpointRequest};
pub use error::{ApiError, ApiResult, ProvisionError, Result};
pub use instance::InstanceOutcome;
pub use kind::{
    EndpointConfigParameters, EndpointParameters, InstanceParameters, ResourceKind,
    ResourceParameters, config_name_for, endpoint_name_for,
};
pub use notify::{DisabledNotifier, Notification, Notifier, NotifyError};
pub use provisioner::Provisioner;
pub use report::{ProvisionEvent, Reporter, SilentReporter, TracingReporter};
pub use request::{ProvisionRequest, ProvisionedResource};
pub use retry::{Backoff, RetryPolicy, RetryState, Sleeper, TokioSleeper};
