//! ResourceClient implementation over EC2 and SageMaker

use crate::ec2::Ec2Launcher;
use crate::sagemaker::SageMakerEndpoints;
use async_trait::async_trait;
use aws_config::SdkConfig;
use provisioner_core::{ApiResult, ConfigDescription, ResourceClient, ResourceParameters};

/// AWS resource client
pub struct AwsResourceClient {
    ec2: Ec2Launcher,
    sagemaker: SageMakerEndpoints,
}

impl AwsResourceClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            ec2: Ec2Launcher::new(aws_sdk_ec2::Client::new(config)),
            sagemaker: SageMakerEndpoints::new(aws_sdk_sagemaker::Client::new(config)),
        }
    }
}

#[async_trait]
impl ResourceClient for AwsResourceClient {
    async fn create_unit(&self, parameters: &ResourceParameters) -> ApiResult<String> {
        match parameters {
            ResourceParameters::Instance(p) => self.ec2.run_instance(p).await,
            ResourceParameters::EndpointConfig(p) => self.sagemaker.create_config(p).await,
            ResourceParameters::Endpoint(p) => self.sagemaker.create_endpoint(p).await,
        }
    }

    async fn describe_config(&self, name: &str) -> ApiResult<Option<ConfigDescription>> {
        self.sagemaker.describe_config(name).await
    }

    async fn delete_config(&self, name: &str) -> ApiResult<()> {
        self.sagemaker.delete_config(name).await
    }
}
