//! Conversation loop: transcript state plus the tool-use chaining cycle.
//!
//! Each user turn runs the same cycle: send the transcript and tool
//! schemas to the model, dispatch whatever tools it requests, feed the
//! results back, and repeat until the model stops asking for tools. The
//! cycle is bounded by `max_tool_rounds` so a model that never stops
//! requesting tools cannot loop forever.

use crate::config::AssistantConfig;
use crate::llm::{ChatRequest, LlmClient, ToolChoice};
use crate::tools::{ToolDispatcher, ToolRegistry};
use crate::types::{ContentBlock, Message, Role, StopReason};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

/// A single user's conversation with the assistant.
///
/// Owns the transcript; every operation takes `&mut self`, so a
/// conversation has exactly one writer and needs no locking.
pub struct Conversation {
    model: String,
    max_tokens: u32,
    max_tool_rounds: u32,
    system_prompt: String,
    history: Vec<Message>,
    llm: Box<dyn LlmClient>,
    dispatcher: ToolDispatcher,
    registry: ToolRegistry,
}

impl Conversation {
    pub fn new(
        config: &AssistantConfig,
        system_prompt: String,
        llm: Box<dyn LlmClient>,
        dispatcher: ToolDispatcher,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            max_tool_rounds: config.max_tool_rounds,
            system_prompt,
            history: Vec::new(),
            llm,
            dispatcher,
            registry,
        }
    }

    /// Process one user message and return the assistant's reply.
    ///
    /// Any failure while querying the model or chaining tool calls is
    /// reported as the reply text. The transcript keeps whatever messages
    /// were appended before the failure; there is no rollback.
    pub async fn process_message(&mut self, user_input: &str) -> String {
        match self.run_turn(user_input).await {
            Ok(text) => text,
            Err(e) => {
                error!("Turn failed: {:#}", e);
                format!("Error processing message: {e}")
            }
        }
    }

    async fn run_turn(&mut self, user_input: &str) -> Result<String> {
        self.history.push(Message::user_text(user_input));

        let tools = self.registry.schemas();

        for round in 0..=self.max_tool_rounds {
            let request = ChatRequest {
                model: &self.model,
                max_tokens: self.max_tokens,
                system: &self.system_prompt,
                messages: &self.history,
                tools: &tools,
                tool_choice: ToolChoice::Auto,
            };

            let response = self.llm.complete(request).await?;

            if response.stop_reason != StopReason::ToolUse {
                let text = response
                    .first_text()
                    .context("Model response contained no text block")?
                    .to_string();
                self.history.push(Message::assistant_text(&text));
                return Ok(text);
            }

            debug!("Tool use requested (round {})", round);

            // The assistant turn keeps every block the model returned, so
            // the tool_use correlation ids stay in the transcript.
            self.history.push(Message {
                role: Role::Assistant,
                content: response.content.clone(),
            });

            for block in &response.content {
                if let ContentBlock::ToolUse { id, name, input } = block {
                    info!("Dispatching tool '{}'", name);
                    let outcome = self.dispatcher.execute(&self.registry, name, input).await;
                    self.history.push(Message::tool_result(
                        id,
                        outcome.content.to_string(),
                        outcome.is_error,
                    ));
                }
            }
        }

        bail!("Tool-use chain exceeded {} rounds", self.max_tool_rounds)
    }

    /// Clear the transcript.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Read access to the transcript.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Re-read the system prompt from the given file.
    pub fn reload_prompt(&mut self, path: &Path) -> Result<()> {
        self.system_prompt = super::system_prompt::load_system_prompt(path)?;
        Ok(())
    }
}
