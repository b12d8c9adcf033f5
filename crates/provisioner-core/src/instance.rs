//! Compute instance provisioning loop

use crate::error::{ApiError, ProvisionError, Result};
use crate::kind::{ResourceKind, ResourceParameters};
use crate::notify::{Notification, notify_best_effort};
use crate::provisioner::Provisioner;
use crate::report::ProvisionEvent;
use crate::request::{ProvisionRequest, ProvisionedResource};
use crate::retry::{RetryState, UnitOutcome, create_one};

/// How an instance run ended
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceOutcome {
    /// Every requested instance was launched
    Completed { resources: Vec<ProvisionedResource> },

    /// The retry budget ran out before all instances were launched
    Exhausted {
        resources: Vec<ProvisionedResource>,
        /// Instances that were requested but never launched
        unmet: u32,
        attempts: u32,
        last_error: Option<ApiError>,
    },
}

impl InstanceOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, InstanceOutcome::Completed { .. })
    }

    pub fn resources(&self) -> &[ProvisionedResource] {
        match self {
            InstanceOutcome::Completed { resources } => resources,
            InstanceOutcome::Exhausted { resources, .. } => resources,
        }
    }
}

impl Provisioner {
    /// Launch `request.desired_count()` instances one at a time.
    ///
    /// Each instance gets a fresh retry budget. A non-retryable error aborts
    /// the run with that error; instances launched before it stay running.
    pub async fn launch_instances(&self, request: &ProvisionRequest) -> Result<InstanceOutcome> {
        let ResourceParameters::Instance(instance) = request.parameters() else {
            return Err(ProvisionError::InvalidRequest(format!(
                "expected instance parameters, got {}",
                request.kind()
            )));
        };

        let total = request.desired_count();
        let cx = self.context(request.retry());
        let mut state = RetryState::new(total);
        let mut resources = Vec::with_capacity(total as usize);

        tracing::info!(
            "Launching {} x {} from {}",
            total,
            instance.instance_type,
            instance.image_id
        );

        while state.remaining > 0 {
            match create_one(cx, request.parameters(), &mut state).await? {
                UnitOutcome::Created(id) => {
                    state.remaining -= 1;
                    self.reporter.report(&ProvisionEvent::Created {
                        kind: ResourceKind::Instance,
                        id: id.clone(),
                        remaining: state.remaining,
                        total,
                    });

                    let notification = Notification::instance_launched(&id, &instance.instance_type);
                    notify_best_effort(
                        self.notifier.as_ref(),
                        self.topic(),
                        &id,
                        &notification,
                        self.reporter.as_ref(),
                    )
                    .await;

                    resources.push(ProvisionedResource::new(id, request.parameters().clone()));
                }
                UnitOutcome::Exhausted { last_error } => {
                    return Ok(InstanceOutcome::Exhausted {
                        resources,
                        unmet: state.remaining,
                        attempts: state.attempts,
                        last_error,
                    });
                }
            }
        }

        Ok(InstanceOutcome::Completed { resources })
    }
}
