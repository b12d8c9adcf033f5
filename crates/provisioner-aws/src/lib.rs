//! AWS provider for Provisioner
//!
//! Implements the provisioner-core collaborator traits on top of the AWS SDK:
//!
//! - EC2 `RunInstances` for compute instances
//! - SageMaker endpoint configurations and endpoints
//! - SNS `Publish` for completion notifications
//!
//! # Example
//!
//! ```ignore
//! use provisioner_aws::{AwsResourceClient, SnsNotifier, load_sdk_config};
//! use provisioner_core::{EnvCredentialProvider, Provisioner};
//! use std::sync::Arc;
//!
//! let sdk = load_sdk_config(&EnvCredentialProvider, Some("us-east-1")).await?;
//! let provisioner = Provisioner::new(Arc::new(AwsResourceClient::new(&sdk)))
//!     .with_notifier(Arc::new(SnsNotifier::new(&sdk)), "arn:aws:sns:us-east-1:123456789012:ops");
//! ```

pub mod client;
pub mod ec2;
pub mod error;
pub mod sagemaker;
pub mod session;
pub mod sns;

pub use client::AwsResourceClient;
pub use ec2::Ec2Launcher;
pub use error::UNKNOWN_CODE;
pub use sagemaker::SageMakerEndpoints;
pub use session::load_sdk_config;
pub use sns::SnsNotifier;
