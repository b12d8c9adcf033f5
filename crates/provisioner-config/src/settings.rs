//! Settings model
//!
//! Every field has a default so an empty (or missing) settings file is valid;
//! only the instance image is required, and only when launching instances.

use crate::error::{ConfigError, Result};
use provisioner_core::{Backoff, EndpointRequest, InstanceParameters, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// AWS region; the SDK default chain is used when unset
    pub region: Option<String>,
    pub retry: RetrySettings,
    pub instance: InstanceSettings,
    pub endpoint: EndpointSettings,
    pub notification: NotificationSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffKind {
    #[default]
    Constant,
    Exponential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub interval_secs: u64,
    pub max_retries: u32,
    pub backoff: BackoffKind,
    /// Growth factor for exponential backoff
    pub multiplier: f64,
    /// Upper bound for exponential backoff
    pub max_delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            max_retries: 10,
            backoff: BackoffKind::Constant,
            multiplier: 2.0,
            max_delay_secs: 300,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> Result<RetryPolicy> {
        let backoff = match self.backoff {
            BackoffKind::Constant => Backoff::Constant,
            BackoffKind::Exponential => {
                if !(self.multiplier.is_finite() && self.multiplier >= 1.0) {
                    return Err(ConfigError::InvalidValue {
                        key: "retry.multiplier",
                        reason: format!("1.0 以上である必要があります ({})", self.multiplier),
                    });
                }
                Backoff::Exponential {
                    multiplier: self.multiplier,
                    max_delay: Duration::from_secs(self.max_delay_secs),
                }
            }
        };

        Ok(RetryPolicy::constant(Duration::from_secs(self.interval_secs), self.max_retries)
            .with_backoff(backoff))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstanceSettings {
    pub image_id: Option<String>,
    pub key_name: Option<String>,
    pub subnet_id: Option<String>,
    pub security_group_ids: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            image_id: None,
            key_name: None,
            subnet_id: None,
            security_group_ids: Vec::new(),
            tags: BTreeMap::from([("demo".to_string(), "true".to_string())]),
        }
    }
}

impl InstanceSettings {
    pub fn parameters(&self, instance_type: &str) -> Result<InstanceParameters> {
        let image_id = self
            .image_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::MissingImageId)?;

        Ok(InstanceParameters {
            image_id,
            instance_type: instance_type.to_string(),
            key_name: self.key_name.clone(),
            subnet_id: self.subnet_id.clone(),
            security_group_ids: self.security_group_ids.clone(),
            tags: self.tags.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointSettings {
    pub variant_name: String,
    pub initial_instance_count: i32,
    pub initial_variant_weight: f32,
    /// Local file that blocks configuration creation while present; `null` disables the check
    pub local_marker: Option<PathBuf>,
    pub tags: BTreeMap<String, String>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            variant_name: "AllTraffic".to_string(),
            initial_instance_count: 1,
            initial_variant_weight: 1.0,
            local_marker: Some(PathBuf::from("config.json")),
            tags: BTreeMap::from([("auto-created".to_string(), "true".to_string())]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationSettings {
    /// SNS topic ARN; notifications are skipped when unset
    pub topic_arn: Option<String>,
}

impl Settings {
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn endpoint_request(&self, model_name: &str, instance_type: &str) -> Result<EndpointRequest> {
        if self.endpoint.initial_instance_count < 1 {
            return Err(ConfigError::InvalidValue {
                key: "endpoint.initial_instance_count",
                reason: "1 以上である必要があります".to_string(),
            });
        }

        let mut request = EndpointRequest::new(model_name, instance_type);
        request.retry = self.retry.policy()?;
        request.variant_name = self.endpoint.variant_name.clone();
        request.initial_instance_count = self.endpoint.initial_instance_count;
        request.initial_variant_weight = self.endpoint.initial_variant_weight;
        request.tags = self.endpoint.tags.clone();
        request.local_marker = self.endpoint.local_marker.clone();
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::from_yaml_str("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml_str("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = Settings::from_yaml_str(
            r#"
region: ap-northeast-1
retry:
  max_retries: 3
instance:
  image_id: ami-0abc
  security_group_ids: [sg-1, sg-2]
  tags:
    Name: gpu-worker
notification:
  topic_arn: arn:aws:sns:ap-northeast-1:123456789012:ops
"#,
        )
        .unwrap();

        assert_eq!(settings.region.as_deref(), Some("ap-northeast-1"));
        assert_eq!(settings.retry.max_retries, 3);
        assert_eq!(settings.retry.interval_secs, 10);
        assert_eq!(settings.instance.security_group_ids, ["sg-1", "sg-2"]);
        // tag keys keep their case
        assert_eq!(settings.instance.tags.get("Name").map(String::as_str), Some("gpu-worker"));
        assert_eq!(settings.endpoint.variant_name, "AllTraffic");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_yaml_str("retry:\n  max_retry: 3\n").is_err());
    }

    #[test]
    fn test_instance_parameters_require_image() {
        let settings = Settings::default();
        assert!(matches!(
            settings.instance.parameters("t3.micro"),
            Err(ConfigError::MissingImageId)
        ));

        let mut settings = Settings::default();
        settings.instance.image_id = Some("ami-1".into());
        let params = settings.instance.parameters("t3.micro").unwrap();
        assert_eq!(params.instance_type, "t3.micro");
        assert_eq!(params.tags.get("demo").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_exponential_policy() {
        let mut retry = RetrySettings {
            backoff: BackoffKind::Exponential,
            interval_secs: 5,
            ..Default::default()
        };
        let policy = retry.policy().unwrap();
        assert_eq!(policy.delay_for(2), Duration::from_secs(10));

        retry.multiplier = 0.5;
        assert!(matches!(
            retry.policy(),
            Err(ConfigError::InvalidValue { key: "retry.multiplier", .. })
        ));
    }

    #[test]
    fn test_endpoint_request_from_settings() {
        let mut settings = Settings::default();
        settings.endpoint.local_marker = None;
        settings.retry.max_retries = 2;

        let request = settings.endpoint_request("bert", "ml.g5.xlarge").unwrap();
        assert_eq!(request.config_name(), "bert-config");
        assert_eq!(request.retry.max_retries, 2);
        assert_eq!(request.local_marker, None);
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = Settings::default().to_yaml().unwrap();
        assert!(yaml.contains("variant_name: AllTraffic"));
        assert_eq!(Settings::from_yaml_str(&yaml).unwrap(), Settings::default());
    }
}
