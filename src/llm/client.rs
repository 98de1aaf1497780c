//! Chat model access via the Anthropic-compatible messages API.

use crate::types::{Message, ModelResponse};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Tool-choice mode sent with a chat request.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to use a tool.
    Auto,
    /// The model must use one of the provided tools.
    Any,
    /// The model must not use tools.
    None,
}

/// One chat completion request: the full transcript plus the tool surface.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub tools: &'a [serde_json::Value],
    pub tool_choice: ToolChoice,
}

/// Chat model abstraction. The conversation loop runs against this trait
/// so tests can substitute a scripted model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one completion and return the full response.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<ModelResponse>;
}

/// Messages API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Create a new client for the given endpoint.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<ModelResponse> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!("Chat request to model: {}", request.model);

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .context("Chat request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Chat request failed ({}): {}", status, body);
        }

        let response: ModelResponse = resp
            .json()
            .await
            .context("Failed to parse chat response")?;

        debug!(
            "Model stopped ({:?}): {} in / {} out tokens",
            response.stop_reason, response.usage.input_tokens, response.usage.output_tokens
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;

    #[test]
    fn chat_request_serializes_to_wire_shape() {
        let messages = vec![Message::user_text("I have a fever.")];
        let tools = vec![json!({
            "name": "get_symptoms",
            "description": "List symptoms",
            "input_schema": { "type": "object", "properties": {}, "required": [] }
        })];

        let request = ChatRequest {
            model: "claude-3-5-sonnet-20241022",
            max_tokens: 1024,
            system: "You are a medical assistant.",
            messages: &messages,
            tools: &tools,
            tool_choice: ToolChoice::Auto,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(value["system"], "You are a medical assistant.");
        assert_eq!(value["tool_choice"], json!({ "type": "auto" }));
        assert_eq!(value["tools"][0]["name"], "get_symptoms");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
    }

    #[test]
    fn empty_tool_list_is_omitted_from_the_request() {
        let messages = vec![Message {
            role: Role::User,
            content: vec![],
        }];
        let request = ChatRequest {
            model: "claude-3-5-sonnet-20241022",
            max_tokens: 1024,
            system: "",
            messages: &messages,
            tools: &[],
            tool_choice: ToolChoice::Auto,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }
}
