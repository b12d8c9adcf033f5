//! Best-effort completion notifications

use crate::report::{ProvisionEvent, Reporter};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Message publishing collaborator
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, subject: &str, message: &str)
    -> Result<(), NotifyError>;
}

/// Placeholder notifier for a provisioner without a topic.
///
/// [`notify_best_effort`] never publishes without a topic, so this is not
/// called on that path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn publish(&self, _: &str, _: &str, _: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// A notification ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    pub fn instance_launched(instance_id: &str, instance_type: &str) -> Self {
        Self {
            subject: format!("EC2 Instance {} Launch Notification", instance_id),
            message: format!(
                "EC2 instance successfully launched!\nInstance ID: {}\nInstance Type: {}",
                instance_id, instance_type
            ),
        }
    }

    pub fn endpoint_created(endpoint_name: &str, model_name: &str, instance_type: &str) -> Self {
        Self {
            subject: format!("SageMaker Endpoint {} Creation Notification", endpoint_name),
            message: format!(
                "SageMaker endpoint successfully created!\nEndpoint Name: {}\nModel Name: {}\nInstance Type: {}",
                endpoint_name, model_name, instance_type
            ),
        }
    }
}

/// Publish `notification` and swallow any failure.
///
/// Returns whether the notification was delivered; callers must not let this
/// change the provisioning outcome.
pub async fn notify_best_effort(
    notifier: &dyn Notifier,
    topic: Option<&str>,
    resource_id: &str,
    notification: &Notification,
    reporter: &dyn Reporter,
) -> bool {
    let Some(topic) = topic else {
        tracing::debug!("No notification topic configured for {}", resource_id);
        return false;
    };

    match notifier
        .publish(topic, &notification.subject, &notification.message)
        .await
    {
        Ok(()) => {
            reporter.report(&ProvisionEvent::NotificationSent {
                resource_id: resource_id.to_string(),
            });
            true
        }
        Err(e) => {
            tracing::warn!("Notification for {} failed: {}", resource_id, e);
            reporter.report(&ProvisionEvent::NotificationFailed {
                resource_id: resource_id.to_string(),
                error: e.to_string(),
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SilentReporter;
    use crate::testing::{RecordingNotifier, RecordingReporter};

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn publish(&self, _: &str, _: &str, _: &str) -> Result<(), NotifyError> {
            Err(NotifyError("AuthorizationError".into()))
        }
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let n = Notification::instance_launched("i-1", "t2.micro");
        let sent =
            notify_best_effort(&FailingNotifier, Some("arn:topic"), "i-1", &n, &SilentReporter)
                .await;
        assert!(!sent);
    }

    #[tokio::test]
    async fn test_no_topic_skips_publish() {
        let n = Notification::instance_launched("i-1", "t2.micro");
        let sent = notify_best_effort(&FailingNotifier, None, "i-1", &n, &SilentReporter).await;
        assert!(!sent);
    }

    #[tokio::test]
    async fn test_no_topic_never_publishes_or_reports() {
        let notifier = RecordingNotifier::default();
        let reporter = RecordingReporter::default();
        let n = Notification::instance_launched("i-1", "t2.micro");

        let sent = notify_best_effort(&notifier, None, "i-1", &n, &reporter).await;

        assert!(!sent);
        assert_eq!(notifier.count(), 0);
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_notifier_succeeds() {
        let n = Notification::instance_launched("i-1", "t2.micro");
        let sent =
            notify_best_effort(&DisabledNotifier, Some("arn:topic"), "i-1", &n, &SilentReporter)
                .await;
        assert!(sent);
    }

    #[test]
    fn test_notification_texts() {
        let n = Notification::endpoint_created("m-endpoint", "m", "ml.m5.large");
        assert_eq!(n.subject, "SageMaker Endpoint m-endpoint Creation Notification");
        assert!(n.message.contains("Model Name: m\n"));
        assert!(n.message.ends_with("Instance Type: ml.m5.large"));
    }
}
