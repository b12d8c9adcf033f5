//! Retry policy and the single-unit bounded retry routine

use crate::classifier::classify;
use crate::client::ResourceClient;
use crate::error::{ApiError, ProvisionError, Result};
use crate::kind::ResourceParameters;
use crate::report::{ProvisionEvent, Reporter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay between attempts grows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Backoff {
    /// Same delay before every retry
    #[default]
    Constant,
    /// `interval * multiplier^(attempt-1)`, capped at `max_delay`
    Exponential { multiplier: f64, max_delay: Duration },
}

/// Retry configuration for a provisioning loop
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Base delay between retries
    pub interval: Duration,

    /// Maximum number of consecutive failed attempts per unit
    pub max_retries: u32,

    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_retries: 10,
            backoff: Backoff::Constant,
        }
    }
}

impl RetryPolicy {
    pub fn constant(interval: Duration, max_retries: u32) -> Self {
        Self {
            interval,
            max_retries,
            backoff: Backoff::Constant,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay to wait after the `attempt`-th consecutive failure (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Constant => self.interval,
            Backoff::Exponential {
                multiplier,
                max_delay,
            } => {
                let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
                let secs = self.interval.as_secs_f64() * multiplier.powi(exponent);
                if !secs.is_finite() || secs >= max_delay.as_secs_f64() {
                    max_delay
                } else {
                    Duration::from_secs_f64(secs.max(0.0))
                }
            }
        }
    }
}

/// Counters owned by a running provisioning loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Units still to create
    pub remaining: u32,
    /// Consecutive retryable failures for the current unit
    pub attempts: u32,
}

impl RetryState {
    pub fn new(desired_count: u32) -> Self {
        Self {
            remaining: desired_count,
            attempts: 0,
        }
    }
}

/// The only suspension point between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Result of trying to create one unit within the retry budget
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UnitOutcome {
    Created(String),
    /// Budget ran out; `last_error` is `None` only when the budget was zero
    Exhausted { last_error: Option<ApiError> },
}

/// Collaborators a provisioning loop runs against
#[derive(Clone, Copy)]
pub(crate) struct LoopContext<'a> {
    pub client: &'a dyn ResourceClient,
    pub sleeper: &'a dyn Sleeper,
    pub reporter: &'a dyn Reporter,
    pub policy: &'a RetryPolicy,
}

/// Create one unit, retrying known-transient errors.
///
/// The attempt counter lives in `state` so the caller can observe it; it is
/// reset to zero on success. No sleep follows the attempt that exhausts the
/// budget.
pub(crate) async fn create_one(
    cx: LoopContext<'_>,
    parameters: &ResourceParameters,
    state: &mut RetryState,
) -> Result<UnitOutcome> {
    let kind = parameters.kind();
    let mut last_error = None;

    while state.attempts < cx.policy.max_retries {
        tracing::debug!("Creating {} (attempt {})", kind, state.attempts + 1);

        let err = match cx.client.create_unit(parameters).await {
            Ok(id) => {
                state.attempts = 0;
                return Ok(UnitOutcome::Created(id));
            }
            Err(err) => err,
        };

        let classification = classify(kind, &err.code, parameters.instance_type());
        if !classification.retryable {
            cx.reporter.report(&ProvisionEvent::Unrecoverable {
                kind,
                reason: classification.reason,
            });
            return Err(ProvisionError::Api { kind, source: err });
        }

        state.attempts += 1;
        last_error = Some(err);

        if state.attempts >= cx.policy.max_retries {
            cx.reporter.report(&ProvisionEvent::RetriesExhausted {
                kind,
                reason: classification.reason,
                attempts: state.attempts,
            });
            break;
        }

        let delay = cx.policy.delay_for(state.attempts);
        cx.reporter.report(&ProvisionEvent::Retrying {
            kind,
            reason: classification.reason,
            attempt: state.attempts,
            max_retries: cx.policy.max_retries,
            delay,
        });
        cx.sleeper.sleep(delay).await;
    }

    Ok(UnitOutcome::Exhausted { last_error })
}
