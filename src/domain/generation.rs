use anyhow::Result;
use async_trait::async_trait;

/// What a provider hands back when it does not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// Generated text.
    Text(String),
    /// A recoverable failure reported by the provider itself. `None` when the
    /// provider flagged a failure without saying why.
    Failure { error: Option<String> },
}

impl ProviderResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: Some(error.into()),
        }
    }
}

/// The text-generation backend. An `Err` is a transport-level or otherwise
/// unrecoverable failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn get_response(&self, prompt: &str) -> Result<ProviderResponse>;
}
