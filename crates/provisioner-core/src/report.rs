//! Progress events emitted by the provisioning loops
//!
//! The loops never print; they hand events to a [`Reporter`] and the CLI
//! decides how to render them.

use crate::kind::ResourceKind;
use std::path::PathBuf;
use std::time::Duration;

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionEvent {
    /// A unit was created
    Created {
        kind: ResourceKind,
        id: String,
        /// Units still to create after this one
        remaining: u32,
        total: u32,
    },
    /// A retryable error occurred and another attempt will follow
    Retrying {
        kind: ResourceKind,
        reason: String,
        attempt: u32,
        max_retries: u32,
        delay: Duration,
    },
    /// The retry budget ran out on a retryable error
    RetriesExhausted {
        kind: ResourceKind,
        reason: String,
        attempts: u32,
    },
    /// A non-retryable error ended the operation
    Unrecoverable { kind: ResourceKind, reason: String },
    NotificationSent { resource_id: String },
    NotificationFailed { resource_id: String, error: String },
    /// The endpoint configuration already exists, nothing was created
    ConfigAlreadyExists {
        config_name: String,
        local_marker: Option<PathBuf>,
    },
    /// Compensating delete of an endpoint configuration
    ConfigCleanup {
        config_name: String,
        error: Option<String>,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: &ProvisionEvent);
}

/// Reporter that forwards every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &ProvisionEvent) {
        match event {
            ProvisionEvent::Retrying { .. }
            | ProvisionEvent::NotificationFailed { .. }
            | ProvisionEvent::ConfigAlreadyExists { .. } => tracing::warn!(?event),
            ProvisionEvent::RetriesExhausted { .. } | ProvisionEvent::Unrecoverable { .. } => {
                tracing::error!(?event)
            }
            ProvisionEvent::ConfigCleanup { error: Some(_), .. } => tracing::error!(?event),
            _ => tracing::info!(?event),
        }
    }
}

/// Reporter that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &ProvisionEvent) {}
}
