pub mod client;

pub use client::{AnthropicClient, ChatRequest, LlmClient, ToolChoice};
