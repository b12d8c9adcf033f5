//! Shared SDK configuration

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ec2::config::Credentials;
use provisioner_core::CredentialProvider;

const PROVIDER_NAME: &str = "provisioner";

/// Build the SDK configuration every service client is created from.
///
/// Credentials come only from `credentials`; the region falls back to the
/// SDK's default chain (`AWS_REGION`, profile) when `region` is `None`.
pub async fn load_sdk_config(
    credentials: &dyn CredentialProvider,
    region: Option<&str>,
) -> provisioner_core::Result<SdkConfig> {
    let creds = credentials.credentials()?;
    tracing::debug!(
        "Using {} credentials for access key {}",
        credentials.source(),
        creds.access_key_id
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).credentials_provider(
        Credentials::new(
            creds.access_key_id,
            creds.secret_access_key,
            None,
            None,
            PROVIDER_NAME,
        ),
    );
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    Ok(loader.load().await)
}
