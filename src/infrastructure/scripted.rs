use crate::domain::errors::Unreachable;
use crate::domain::generation::{GenerationProvider, ProviderResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// One canned provider outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Reported(Option<String>),
    Unreachable,
    Rejected(String),
}

/// A provider that plays back queued replies, for demos and tests. Once
/// the queue is empty it echoes the prompt.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            delay: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn get_response(&self, prompt: &str) -> Result<ProviderResponse> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(ProviderResponse::Text(text)),
            Some(Reply::Reported(error)) => Ok(ProviderResponse::Failure { error }),
            Some(Reply::Unreachable) => Err(Unreachable::new("scripted outage").into()),
            Some(Reply::Rejected(msg)) => Err(anyhow!(msg)),
            None => Ok(ProviderResponse::Text(prompt.to_string())),
        }
    }
}
