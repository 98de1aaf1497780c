//! Medassist — medical symptom chatbot assistant.
//!
//! A conversational agent that pairs an Anthropic-compatible chat model
//! with two HTTP-backed medical knowledge tools and chains tool calls
//! until the model produces a final answer.

pub mod agent;
pub mod config;
pub mod knowledge;
pub mod llm;
pub mod tools;
pub mod types;
