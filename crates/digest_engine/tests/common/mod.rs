#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use digest_engine::{Delay, EngineEvent, ModelClient, ModelError, ProgressSink};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

/// Replays canned replies in order and records every prompt it receives.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
    configured: bool,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            configured: true,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedClient {
    fn ensure_configured(&self) -> Result<(), ModelError> {
        if self.configured {
            Ok(())
        } else {
            Err(ModelError::Config("CLAUDE_API_KEY secret is not set.".to_string()))
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("unscripted reply".to_string()))
    }
}

pub fn upstream(status: u16) -> ModelError {
    ModelError::Upstream {
        status,
        body: "{\"error\":\"boom\"}".to_string(),
    }
}

/// Records requested pauses without sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
