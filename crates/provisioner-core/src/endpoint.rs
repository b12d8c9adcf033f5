//! Managed endpoint provisioning
//!
//! Two phases against independent provider objects:
//!
//! 1. create the endpoint configuration, refusing when one already exists
//!    locally or remotely
//! 2. create the endpoint from it, deleting the configuration again if the
//!    endpoint cannot be created

use crate::error::{ApiError, ProvisionError, Result};
use crate::kind::{
    EndpointConfigParameters, EndpointParameters, ResourceKind, ResourceParameters,
    config_name_for, endpoint_name_for,
};
use crate::notify::{Notification, notify_best_effort};
use crate::provisioner::Provisioner;
use crate::report::ProvisionEvent;
use crate::request::ProvisionedResource;
use crate::retry::{RetryPolicy, RetryState, UnitOutcome, create_one};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Request to deploy a model behind a managed endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRequest {
    pub model_name: String,
    pub instance_type: String,
    pub retry: RetryPolicy,
    pub variant_name: String,
    pub initial_instance_count: i32,
    pub initial_variant_weight: f32,
    pub tags: BTreeMap<String, String>,
    /// Local file whose presence blocks configuration creation
    pub local_marker: Option<PathBuf>,
}

impl EndpointRequest {
    pub fn new(model_name: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            instance_type: instance_type.into(),
            retry: RetryPolicy::default(),
            variant_name: "AllTraffic".to_string(),
            initial_instance_count: 1,
            initial_variant_weight: 1.0,
            tags: BTreeMap::from([("auto-created".to_string(), "true".to_string())]),
            local_marker: Some(PathBuf::from("config.json")),
        }
    }

    pub fn config_name(&self) -> String {
        config_name_for(&self.model_name)
    }

    pub fn endpoint_name(&self) -> String {
        endpoint_name_for(&self.model_name)
    }

    fn config_parameters(&self) -> ResourceParameters {
        ResourceParameters::EndpointConfig(EndpointConfigParameters {
            config_name: self.config_name(),
            model_name: self.model_name.clone(),
            instance_type: self.instance_type.clone(),
            variant_name: self.variant_name.clone(),
            initial_instance_count: self.initial_instance_count,
            initial_variant_weight: self.initial_variant_weight,
        })
    }

    fn endpoint_parameters(&self) -> ResourceParameters {
        ResourceParameters::Endpoint(EndpointParameters {
            endpoint_name: self.endpoint_name(),
            config_name: self.config_name(),
            tags: self.tags.clone(),
        })
    }
}

/// Where an existing configuration was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    Local(PathBuf),
    Remote,
}

/// How an endpoint run ended
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointOutcome {
    Created {
        config: ProvisionedResource,
        endpoint: ProvisionedResource,
    },

    /// Nothing was created because the configuration already exists
    AlreadyExists {
        config_name: String,
        location: ConfigLocation,
    },

    /// A phase ran out of retries
    Exhausted {
        phase: ResourceKind,
        attempts: u32,
        last_error: Option<ApiError>,
        /// Whether a configuration created by this run was deleted again
        config_deleted: bool,
    },
}

impl EndpointOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, EndpointOutcome::Created { .. })
    }
}

impl Provisioner {
    /// Create the endpoint configuration and then the endpoint for
    /// `request.model_name`.
    pub async fn create_endpoint(&self, request: &EndpointRequest) -> Result<EndpointOutcome> {
        let config_name = request.config_name();

        if let Some(location) = self.existing_config(request, &config_name).await? {
            self.reporter.report(&ProvisionEvent::ConfigAlreadyExists {
                config_name: config_name.clone(),
                local_marker: match &location {
                    ConfigLocation::Local(path) => Some(path.clone()),
                    ConfigLocation::Remote => None,
                },
            });
            return Ok(EndpointOutcome::AlreadyExists {
                config_name,
                location,
            });
        }

        let cx = self.context(&request.retry);

        // Phase 1: configuration
        let config_params = request.config_parameters();
        let mut state = RetryState::new(1);
        let config = match create_one(cx, &config_params, &mut state).await? {
            UnitOutcome::Created(id) => {
                self.reporter.report(&ProvisionEvent::Created {
                    kind: ResourceKind::EndpointConfig,
                    id: config_name.clone(),
                    remaining: 0,
                    total: 1,
                });
                ProvisionedResource::new(id, config_params)
            }
            UnitOutcome::Exhausted { last_error } => {
                return Ok(EndpointOutcome::Exhausted {
                    phase: ResourceKind::EndpointConfig,
                    attempts: state.attempts,
                    last_error,
                    config_deleted: false,
                });
            }
        };

        // Phase 2: endpoint
        let endpoint_params = request.endpoint_parameters();
        let endpoint_name = request.endpoint_name();
        let mut state = RetryState::new(1);
        match create_one(cx, &endpoint_params, &mut state).await {
            Ok(UnitOutcome::Created(id)) => {
                self.reporter.report(&ProvisionEvent::Created {
                    kind: ResourceKind::Endpoint,
                    id: endpoint_name.clone(),
                    remaining: 0,
                    total: 1,
                });

                let notification = Notification::endpoint_created(
                    &endpoint_name,
                    &request.model_name,
                    &request.instance_type,
                );
                notify_best_effort(
                    self.notifier.as_ref(),
                    self.topic(),
                    &endpoint_name,
                    &notification,
                    self.reporter.as_ref(),
                )
                .await;

                Ok(EndpointOutcome::Created {
                    config,
                    endpoint: ProvisionedResource::new(id, endpoint_params),
                })
            }
            Ok(UnitOutcome::Exhausted { last_error }) => {
                let config_deleted = self.cleanup_config(&config_name).await;
                Ok(EndpointOutcome::Exhausted {
                    phase: ResourceKind::Endpoint,
                    attempts: state.attempts,
                    last_error,
                    config_deleted,
                })
            }
            Err(err) => {
                // the endpoint error stays authoritative whatever cleanup does
                self.cleanup_config(&config_name).await;
                Err(err)
            }
        }
    }

    async fn existing_config(
        &self,
        request: &EndpointRequest,
        config_name: &str,
    ) -> Result<Option<ConfigLocation>> {
        if let Some(marker) = request.local_marker.as_ref().filter(|m| m.exists()) {
            tracing::debug!("Local configuration marker found: {}", marker.display());
            return Ok(Some(ConfigLocation::Local(marker.clone())));
        }

        match self.client.describe_config(config_name).await {
            Ok(Some(_)) => Ok(Some(ConfigLocation::Remote)),
            Ok(None) => Ok(None),
            Err(source) => Err(ProvisionError::Describe {
                name: config_name.to_string(),
                source,
            }),
        }
    }

    /// Compensating delete; returns whether it succeeded
    async fn cleanup_config(&self, config_name: &str) -> bool {
        let result = self.client.delete_config(config_name).await;
        let error = result.as_ref().err().map(ToString::to_string);
        if let Some(e) = &error {
            tracing::warn!("Failed to clean up config {}: {}", config_name, e);
        }
        self.reporter.report(&ProvisionEvent::ConfigCleanup {
            config_name: config_name.to_string(),
            error,
        });
        result.is_ok()
    }
}
