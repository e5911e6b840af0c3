use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::providers::chat::{ChatMessage, ChatReply, FunctionCall, FunctionSpec};
use crate::providers::traits::CompletionProvider;

/// Any OpenAI-compatible `/chat/completions` endpoint (OpenAI, OpenRouter,
/// DeepSeek, Mistral), including the legacy `functions` calling interface.
#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: String,
    system_message: String,
    client: Client,
    config: ProviderConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<&'a [FunctionSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<&'static str>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    function_call: Option<FunctionCall>,
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn new(config: ProviderConfig, api_key: String, system_message: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(anyhow!("Missing API key, set {}", config.api_key_var()));
        }

        Ok(Self {
            api_key,
            system_message,
            client: Client::new(),
            config,
        })
    }

    async fn chat(&self, messages: &[ChatMessage], functions: &[FunctionSpec]) -> Result<ChatReply> {
        let offers_functions = !functions.is_empty();
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            functions: offers_functions.then_some(functions),
            function_call: offers_functions.then_some("auto"),
        };

        debug!(
            "Chat request to {} ({} messages, {} functions)",
            self.config.model,
            messages.len(),
            functions.len()
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("API request failed: Status {}, Body: {}", status, error_text));
        }

        let body: ChatResponse = response.json().await?;

        // Check for API-level errors
        if let Some(error) = body.error {
            return Err(anyhow!("API returned error: {}", error));
        }

        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow!("No choices in completion response"))?;

        if let Some(call) = message.function_call {
            return Ok(ChatReply::FunctionCall(call));
        }

        message
            .content
            .map(ChatReply::Text)
            .ok_or_else(|| anyhow!("No response content"))
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }

    fn get_system_message(&self) -> String {
        self.system_message.clone()
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
