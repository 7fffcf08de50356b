//! OpenRouter provider implementation for TeachAssist
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint; OpenRouter is
//! the default. Text conversations are sent as plain string content, image
//! requests as a text part plus an `image_url` part carrying a data URL.

use crate::config::ProviderConfig;
use crate::error::{Result, TeachAssistError};
use crate::providers::{ImageInput, Message, Provider, Role};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat completions provider
///
/// # Examples
///
/// ```no_run
/// use teachassist::config::ProviderConfig;
/// use teachassist::providers::{Message, OpenRouterProvider, Provider};
///
/// # async fn example() -> teachassist::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("sk-or-...".to_string()),
///     ..Default::default()
/// };
/// let provider = OpenRouterProvider::new(config)?;
/// let text = provider
///     .complete("You write school reports.", &[Message::user("Sophie is great in class")])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenRouterProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: ChatContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a new provider instance
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is configured, or a
    /// provider error if the HTTP client cannot be built
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TeachAssistError::Config(
                    "OpenRouter API key is not configured (set OPENROUTER_API_KEY)".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("teachassist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TeachAssistError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenRouter provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Prepend the system prompt and drop any stored system messages
    fn convert_messages(&self, system_prompt: &str, messages: &[Message]) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage {
            role: Role::System.as_str(),
            content: ChatContent::Text(system_prompt.to_string()),
        })
        .chain(
            messages
                .iter()
                .filter(|m| m.role != Role::System)
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: ChatContent::Text(m.content.clone()),
                }),
        )
        .collect()
    }

    async fn send(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
        };

        tracing::debug!(
            "Sending chat completion request: {} messages, model={}",
            request.messages.len(),
            request.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                TeachAssistError::generation(format!("Request to AI service failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("AI service returned error {}: {}", status, body);
            let detail = extract_error_detail(&body)
                .unwrap_or_else(|| "Failed to generate content from AI service".to_string());
            return Err(TeachAssistError::generation(format!("{} ({})", detail, status)).into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            TeachAssistError::generation(format!("Failed to parse AI service response: {}", e))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| TeachAssistError::generation("No content generated from AI service"))?;

        tracing::debug!("Received {} characters from AI service", content.len());
        Ok(content)
    }
}

/// Pull a human-readable detail out of an error body
///
/// Accepts `{"error": {"message": ...}}`, `{"error": "..."}`, and
/// `{"message": ...}`; anything else yields `None`.
fn extract_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let detail = match value.get("error") {
        Some(serde_json::Value::Object(obj)) => obj.get("message").and_then(|m| m.as_str()),
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        _ => value.get("message").and_then(|m| m.as_str()),
    };

    detail
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Provider for OpenRouterProvider {
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String> {
        let messages = self.convert_messages(system_prompt, messages);
        self.send(messages).await
    }

    async fn complete_with_image(
        &self,
        system_prompt: &str,
        text: &str,
        image: &ImageInput,
    ) -> Result<String> {
        let messages = vec![
            ChatMessage {
                role: Role::System.as_str(),
                content: ChatContent::Text(system_prompt.to_string()),
            },
            ChatMessage {
                role: Role::User.as_str(),
                content: ChatContent::Parts(vec![
                    ContentPart::Text {
                        text: text.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_url(),
                        },
                    },
                ]),
            },
        ];
        self.send(messages).await
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}
