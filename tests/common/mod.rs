#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;

use teachassist::config::Config;
use teachassist::error::{Result, TeachAssistError};
use teachassist::providers::{ImageInput, Message, Provider};
use teachassist::session::SessionManager;
use teachassist::storage::{KeyValueStore, MemoryStore};

/// One request as seen by [`MockProvider`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub image: Option<ImageInput>,
}

/// Provider double with canned replies, an optional delay, and an optional
/// gate that holds every reply until the test releases it
pub struct MockProvider {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
    started: Arc<Notify>,
}

impl MockProvider {
    pub fn new(replies: Vec<std::result::Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
            delay: None,
            gate: None,
            started: Arc::new(Notify::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(*r)).collect())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold replies until `gate.notify_one()` is called
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Notified each time a request reaches the provider
    pub fn started(&self) -> Arc<Notify> {
        self.started.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn reply(&self, call: RecordedCall) -> Result<String> {
        self.calls.lock().unwrap().push(call);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(text)) => Ok(text),
            Some(Err(detail)) => Err(TeachAssistError::generation(detail).into()),
            None => Err(TeachAssistError::generation("no reply scripted").into()),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String> {
        self.reply(RecordedCall {
            system_prompt: system_prompt.to_string(),
            messages: messages.to_vec(),
            image: None,
        })
        .await
    }

    async fn complete_with_image(
        &self,
        system_prompt: &str,
        text: &str,
        image: &ImageInput,
    ) -> Result<String> {
        self.reply(RecordedCall {
            system_prompt: system_prompt.to_string(),
            messages: vec![Message::user(text)],
            image: Some(image.clone()),
        })
        .await
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Store that reads normally but refuses every write
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(TeachAssistError::Storage("quota exceeded".to_string()).into())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

/// Manager over `provider` and `store` with default settings
pub fn manager_with(provider: Arc<MockProvider>, store: Arc<dyn KeyValueStore>) -> SessionManager {
    SessionManager::new(provider, store, &Config::default())
}

pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
