//! Base provider trait and common types for TeachAssist
//!
//! This module defines the Provider trait that the generation boundary must
//! implement, along with the message and image types that cross it.

use crate::error::Result;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Prompt configuration; only ever supplied by the provider boundary
    System,
    /// Teacher input or refinement instruction
    User,
    /// Model output
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message structure for conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use teachassist::providers::{Message, Role};
    ///
    /// let msg = Message::user("Sophie is great in class");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// An image sent alongside a text prompt
#[derive(Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// MIME type, e.g. `image/png`
    pub media_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ImageInput {
    /// Wrap raw bytes with their media type
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    /// Encode as a `data:` URL
    ///
    /// # Examples
    ///
    /// ```
    /// use teachassist::providers::ImageInput;
    ///
    /// let image = ImageInput::new("image/png", vec![1, 2, 3]);
    /// assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    /// ```
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

impl fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageInput")
            .field("media_type", &self.media_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Provider trait for the external generation boundary
///
/// The provider owns the system message: callers pass the system prompt
/// separately and the provider prepends it to the outgoing request. Any
/// `system` messages inside `messages` are ignored.
///
/// Implementations return the assistant text of a single completion, or an
/// error whose message carries the upstream detail when one was supplied.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Complete a text conversation
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails, returns a non-success status, or
    /// the response contains no content
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String>;

    /// Complete a single user turn that carries an image
    ///
    /// # Default Implementation
    ///
    /// Returns an error indicating that image input is not supported.
    async fn complete_with_image(
        &self,
        _system_prompt: &str,
        _text: &str,
        _image: &ImageInput,
    ) -> Result<String> {
        Err(crate::error::TeachAssistError::Provider(
            "Image input is not supported by this provider".to_string(),
        )
        .into())
    }

    /// Name used in logs
    fn name(&self) -> &str {
        "provider"
    }
}
