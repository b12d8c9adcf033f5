//! SageMaker endpoint configuration and endpoint operations

use crate::error::{api_error, build_error};
use aws_sdk_sagemaker::Client;
use aws_sdk_sagemaker::types::{ProductionVariant, ProductionVariantInstanceType, Tag};
use provisioner_core::{
    ApiResult, ConfigDescription, EndpointConfigParameters, EndpointParameters,
};
use std::collections::BTreeMap;

/// Code SageMaker returns from DescribeEndpointConfig for a missing config
const NOT_FOUND_CODE: &str = "ValidationException";

/// SageMaker API wrapper
pub struct SageMakerEndpoints {
    client: Client,
}

impl SageMakerEndpoints {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create an endpoint configuration with a single production variant.
    /// Returns the configuration name.
    pub async fn create_config(&self, params: &EndpointConfigParameters) -> ApiResult<String> {
        tracing::debug!(
            "CreateEndpointConfig: {} (model={}, type={})",
            params.config_name,
            params.model_name,
            params.instance_type
        );

        let variant = ProductionVariant::builder()
            .variant_name(&params.variant_name)
            .model_name(&params.model_name)
            .instance_type(ProductionVariantInstanceType::from(
                params.instance_type.as_str(),
            ))
            .initial_instance_count(params.initial_instance_count)
            .initial_variant_weight(params.initial_variant_weight)
            .build()
            .map_err(build_error)?;

        self.client
            .create_endpoint_config()
            .endpoint_config_name(&params.config_name)
            .production_variants(variant)
            .send()
            .await
            .map_err(api_error)?;

        Ok(params.config_name.clone())
    }

    /// Create an endpoint from an existing configuration. Returns the endpoint name.
    pub async fn create_endpoint(&self, params: &EndpointParameters) -> ApiResult<String> {
        tracing::debug!(
            "CreateEndpoint: {} from {}",
            params.endpoint_name,
            params.config_name
        );

        self.client
            .create_endpoint()
            .endpoint_name(&params.endpoint_name)
            .endpoint_config_name(&params.config_name)
            .set_tags(Some(endpoint_tags(&params.tags)?))
            .send()
            .await
            .map_err(api_error)?;

        Ok(params.endpoint_name.clone())
    }

    pub async fn describe_config(&self, name: &str) -> ApiResult<Option<ConfigDescription>> {
        let result = self
            .client
            .describe_endpoint_config()
            .endpoint_config_name(name)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error);
        config_lookup(result, name)
    }

    pub async fn delete_config(&self, name: &str) -> ApiResult<()> {
        tracing::debug!("DeleteEndpointConfig: {}", name);
        self.client
            .delete_endpoint_config()
            .endpoint_config_name(name)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}

/// Interpret a DescribeEndpointConfig result; a not-found error means the
/// configuration does not exist
fn config_lookup(result: ApiResult<()>, name: &str) -> ApiResult<Option<ConfigDescription>> {
    match result {
        Ok(()) => Ok(Some(ConfigDescription::new(name))),
        Err(err) if err.code == NOT_FOUND_CODE => {
            tracing::debug!("Endpoint config {} not found: {}", name, err.message);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn endpoint_tags(tags: &BTreeMap<String, String>) -> ApiResult<Vec<Tag>> {
    tags.iter()
        .map(|(key, value)| {
            Tag::builder()
                .key(key)
                .value(value)
                .build()
                .map_err(build_error)
        })
        .collect()
}
