//! Provider module for TeachAssist
//!
//! This module contains the generation boundary abstraction and the
//! OpenRouter (OpenAI-compatible) implementation.

pub mod base;
pub mod openrouter;

pub use base::{ImageInput, Message, Provider, Role};
pub use openrouter::OpenRouterProvider;

use crate::config::ProviderConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the configured provider
///
/// The provider is created once at startup and shared by every session
/// operation.
///
/// # Errors
///
/// Returns error if the provider cannot be initialized (e.g. missing API key)
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    Ok(Arc::new(OpenRouterProvider::new(config.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error_contains, test_config};

    #[test]
    fn test_create_provider_with_key() {
        let provider = create_provider(&test_config().provider).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn test_create_provider_without_key_fails() {
        assert_error_contains(
            create_provider(&ProviderConfig::default()),
            "API key is not configured",
        );
    }
}
