//! EC2 instance launches

use crate::error::api_error;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::{InstanceType, ResourceType, Tag, TagSpecification};
use provisioner_core::{ApiError, ApiResult, InstanceParameters};
use std::collections::BTreeMap;

/// EC2 API wrapper
pub struct Ec2Launcher {
    client: Client,
}

impl Ec2Launcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Launch exactly one instance and return its instance ID
    pub async fn run_instance(&self, params: &InstanceParameters) -> ApiResult<String> {
        tracing::debug!(
            "RunInstances: image={} type={} subnet={:?}",
            params.image_id,
            params.instance_type,
            params.subnet_id
        );

        let mut request = self
            .client
            .run_instances()
            .image_id(&params.image_id)
            .instance_type(InstanceType::from(params.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .set_key_name(params.key_name.clone())
            .set_subnet_id(params.subnet_id.clone());

        for group in &params.security_group_ids {
            request = request.security_group_ids(group);
        }

        if let Some(spec) = instance_tag_specification(&params.tags) {
            request = request.tag_specifications(spec);
        }

        let output = request.send().await.map_err(api_error)?;
        first_instance_id(output.instances().iter().map(|i| i.instance_id()))
    }
}

/// First instance ID of a RunInstances response
fn first_instance_id<'a>(ids: impl IntoIterator<Item = Option<&'a str>>) -> ApiResult<String> {
    ids.into_iter()
        .next()
        .flatten()
        .map(str::to_string)
        .ok_or_else(|| ApiError::new("MissingInstanceId", "RunInstances returned no instance ID"))
}

/// Tag specification applied to the instance resource, `None` without tags
fn instance_tag_specification(tags: &BTreeMap<String, String>) -> Option<TagSpecification> {
    if tags.is_empty() {
        return None;
    }

    let tags = tags
        .iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect();

    Some(
        TagSpecification::builder()
            .resource_type(ResourceType::Instance)
            .set_tags(Some(tags))
            .build(),
    )
}
