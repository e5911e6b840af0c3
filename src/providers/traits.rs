use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::providers::chat::{ChatMessage, ChatReply, FunctionSpec};

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn new(config: ProviderConfig, api_key: String, system_message: String) -> Result<Self>
    where
        Self: Sized;

    /// One chat round-trip. `functions` may be empty, in which case the
    /// service is not offered any callable operations.
    async fn chat(&self, messages: &[ChatMessage], functions: &[FunctionSpec]) -> Result<ChatReply>;

    /// Plain completion: the provider's system message plus one user prompt.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(self.get_system_message()),
            ChatMessage::user(prompt),
        ];

        match self.chat(&messages, &[]).await? {
            ChatReply::Text(text) => Ok(text),
            ChatReply::FunctionCall(call) => Err(anyhow!(
                "Unexpected function call '{}' in plain completion",
                call.name
            )),
        }
    }

    async fn get_model_info(&self) -> Result<String>;

    fn get_system_message(&self) -> String;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
