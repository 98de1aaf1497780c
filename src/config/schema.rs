//! Configuration schema for medassist.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Anthropic-compatible API base URL.
    pub anthropic_api_url: String,

    /// API key; leave empty to read ANTHROPIC_API_KEY from the environment.
    pub anthropic_api_key: String,

    /// Chat model used for the conversation loop.
    pub model: String,

    /// Maximum tokens per model response.
    pub max_tokens: u32,

    /// Maximum tool round-trips within one user turn.
    pub max_tool_rounds: u32,

    /// Knowledge service base URL.
    pub knowledge_api_url: String,

    /// Access token for the knowledge service (empty = unauthenticated).
    pub knowledge_api_token: String,

    /// Language code sent to the knowledge service.
    pub language: String,

    /// Path to the system prompt YAML file.
    pub prompt_path: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            anthropic_api_url: "https://api.anthropic.com".into(),
            anthropic_api_key: String::new(),
            model: "claude-3-5-sonnet-20241022".into(),
            max_tokens: 1024,
            max_tool_rounds: 8,
            knowledge_api_url: "https://healthservice.priaid.ch".into(),
            knowledge_api_token: String::new(),
            language: "en-gb".into(),
            prompt_path: "~/.medassist/prompt.yaml".into(),
        }
    }
}

impl AssistantConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    /// Resolved prompt file path.
    pub fn resolved_prompt_path(&self) -> String {
        self.resolve_path(&self.prompt_path)
    }

    /// API key from the config file, falling back to the environment.
    pub fn effective_api_key(&self) -> Result<String> {
        if !self.anthropic_api_key.is_empty() {
            return Ok(self.anthropic_api_key.clone());
        }
        std::env::var("ANTHROPIC_API_KEY")
            .context("anthropic_api_key is not set and ANTHROPIC_API_KEY is not in the environment")
    }

    /// Knowledge service token, if one is configured.
    pub fn knowledge_token(&self) -> Option<&str> {
        if self.knowledge_api_token.is_empty() {
            None
        } else {
            Some(&self.knowledge_api_token)
        }
    }
}
