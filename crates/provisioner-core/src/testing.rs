//! Scripted collaborators for loop tests

use crate::client::{ConfigDescription, ResourceClient};
use crate::error::{ApiError, ApiResult};
use crate::kind::{ResourceKind, ResourceParameters};
use crate::notify::{Notifier, NotifyError};
use crate::report::{ProvisionEvent, Reporter};
use crate::retry::Sleeper;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Client whose create calls pop scripted results per kind.
///
/// When a script runs dry the fallback result is returned.
pub struct ScriptedClient {
    scripts: Mutex<Vec<(ResourceKind, VecDeque<ApiResult<String>>)>>,
    fallback: ApiResult<String>,
    existing_config: Mutex<ApiResult<Option<ConfigDescription>>>,
    delete_result: ApiResult<()>,
    pub created: Mutex<Vec<ResourceParameters>>,
    pub create_calls: AtomicUsize,
    pub describe_calls: AtomicUsize,
    pub delete_calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(Vec::new()),
            fallback: Err(ApiError::new("ScriptExhausted", "no scripted result left")),
            existing_config: Mutex::new(Ok(None)),
            delete_result: Ok(()),
            created: Mutex::new(Vec::new()),
            create_calls: AtomicUsize::new(0),
            describe_calls: AtomicUsize::new(0),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(self, kind: ResourceKind, results: Vec<ApiResult<String>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .push((kind, results.into_iter().collect()));
        self
    }

    pub fn always(mut self, result: ApiResult<String>) -> Self {
        self.fallback = result;
        self
    }

    pub fn with_existing_config(self, result: ApiResult<Option<ConfigDescription>>) -> Self {
        *self.existing_config.lock().unwrap() = result;
        self
    }

    pub fn with_delete_result(mut self, result: ApiResult<()>) -> Self {
        self.delete_result = result;
        self
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn creates_of(&self, kind: ResourceKind) -> usize {
        self.created
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.kind() == kind)
            .count()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceClient for ScriptedClient {
    async fn create_unit(&self, parameters: &ResourceParameters) -> ApiResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(parameters.clone());

        let mut scripts = self.scripts.lock().unwrap();
        let next = scripts
            .iter_mut()
            .find(|(kind, _)| *kind == parameters.kind())
            .and_then(|(_, queue)| queue.pop_front());
        next.unwrap_or_else(|| self.fallback.clone())
    }

    async fn describe_config(&self, _name: &str) -> ApiResult<Option<ConfigDescription>> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.existing_config.lock().unwrap().clone()
    }

    async fn delete_config(&self, name: &str) -> ApiResult<()> {
        self.delete_calls.lock().unwrap().push(name.to_string());
        self.delete_result.clone()
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub published: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, subject: &str, _message: &str) -> Result<(), NotifyError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), subject.to_string()));
        if self.fail {
            Err(NotifyError("topic does not exist".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<ProvisionEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ProvisionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &ProvisionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn transient(code: &str) -> ApiResult<String> {
    Err(ApiError::new(code, "try again later"))
}

pub fn fatal(code: &str) -> ApiResult<String> {
    Err(ApiError::new(code, "request can never succeed"))
}
