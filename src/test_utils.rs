//! Test utilities for TeachAssist
//!
//! Temporary files, a configuration with credentials, a scripted provider,
//! and an error assertion shared by the unit tests.

use crate::config::Config;
use crate::error::{Result, TeachAssistError};
use crate::providers::{ImageInput, Message, Provider};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Scratch directory removed on drop
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` (text or raw image bytes) to `dir/name`
pub fn create_test_file(dir: &TempDir, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Panics unless `result` is an error whose message contains `expected`
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration with an API key set
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.api_key = Some("sk-test".to_string());
    config
}

/// Provider that replays canned responses and records what it was sent
pub struct ScriptedProvider {
    responses: Mutex<Vec<Result<String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    /// Provider answering with `responses` in order
    pub fn new(responses: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Message lists received so far
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, _system_prompt: &str, messages: &[Message]) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(TeachAssistError::generation("no scripted response").into());
        }
        responses.remove(0)
    }

    async fn complete_with_image(
        &self,
        system_prompt: &str,
        text: &str,
        _image: &ImageInput,
    ) -> Result<String> {
        self.complete(system_prompt, &[Message::user(text)]).await
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "notes.txt", "Sophie");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Sophie");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(TeachAssistError::Config("invalid".to_string()).into());
        assert_error_contains(result, "invalid");
    }

    #[test]
    #[should_panic(expected = "but got Ok")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "anything");
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new(vec![Ok("one".into()), Ok("two".into())]);
        assert_eq!(provider.complete("", &[Message::user("a")]).await.unwrap(), "one");
        assert_eq!(provider.complete("", &[Message::user("b")]).await.unwrap(), "two");
        assert!(provider.complete("", &[]).await.is_err());
        assert_eq!(provider.calls().len(), 3);
    }
}
