//! Provisioner: the collaborators shared by every provisioning loop

use crate::client::ResourceClient;
use crate::notify::{DisabledNotifier, Notifier};
use crate::report::{Reporter, TracingReporter};
use crate::retry::{LoopContext, RetryPolicy, Sleeper, TokioSleeper};
use std::sync::Arc;

/// Runs provisioning loops against a resource client
///
/// Loops are strictly sequential: one provider call in flight at a time.
pub struct Provisioner {
    pub(crate) client: Arc<dyn ResourceClient>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) sleeper: Arc<dyn Sleeper>,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) topic: Option<String>,
}

impl Provisioner {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            notifier: Arc::new(DisabledNotifier),
            sleeper: Arc::new(TokioSleeper),
            reporter: Arc::new(TracingReporter),
            topic: None,
        }
    }

    /// Publish success notifications to `topic` through `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>, topic: impl Into<String>) -> Self {
        self.notifier = notifier;
        self.topic = Some(topic.into());
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub(crate) fn context<'a>(&'a self, policy: &'a RetryPolicy) -> LoopContext<'a> {
        LoopContext {
            client: self.client.as_ref(),
            sleeper: self.sleeper.as_ref(),
            reporter: self.reporter.as_ref(),
            policy,
        }
    }
}
