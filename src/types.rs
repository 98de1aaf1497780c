//! Shared types used across the assistant runtime.

use serde::{Deserialize, Serialize};
use serde_json::json;

// ---------------------------------------------------------------------------
// Conversation transcript
// ---------------------------------------------------------------------------

/// Role of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single content block within a message.
///
/// The messages API represents message bodies as ordered block lists. A
/// block is either plain text, a tool-use request issued by the model, or
/// a tool result fed back to it. `ToolResult` blocks always travel in
/// user-role messages and carry the correlation id of the `ToolUse` block
/// they answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        is_error: bool,
    },
}

/// A message in the conversation transcript. Append-only; insertion order
/// is the order replayed to the model each turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Plain-text user message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Plain-text assistant message.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// User-role message carrying a single tool result block.
    pub fn tool_result(tool_use_id: impl Into<String>, content: String, is_error: bool) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::ToolResult {
                tool_use_id: tool_use_id.into(),
                content,
                is_error,
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Model responses
// ---------------------------------------------------------------------------

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    /// Stop reasons this crate does not interpret.
    #[serde(other)]
    Other,
}

/// Token usage reported by the model provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A complete (non-streamed) model response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: StopReason,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl ModelResponse {
    /// First text block of the response, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tool outcomes
// ---------------------------------------------------------------------------

/// Uniform result of one tool dispatch.
///
/// `content` is either the tool's payload or an `{"error": ...}` envelope;
/// `is_error` tells the two apart. Every dispatched call resolves to
/// exactly one outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub content: serde_json::Value,
    pub is_error: bool,
}

impl ToolOutcome {
    /// Successful outcome wrapping the tool's payload.
    pub fn ok(content: serde_json::Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Failed outcome carrying an error description.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            content: json!({ "error": message }),
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Knowledge service records
// ---------------------------------------------------------------------------

/// A symptom catalog entry. The upstream service uses capitalized keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symptom {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub description: String,
}

/// A recommended medical specialization with its confidence score.
/// Elements missing any of the three keys make the whole response
/// malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationRecommendation {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Accuracy")]
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_blocks_serialize_with_type_tags() {
        let block = ContentBlock::ToolUse {
            id: "toolu_01".into(),
            name: "get_symptoms".into(),
            input: json!({}),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
        assert_eq!(value["name"], "get_symptoms");

        let block = ContentBlock::ToolResult {
            tool_use_id: "toolu_01".into(),
            content: "{\"symptoms\":[]}".into(),
            is_error: false,
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_result");
        assert_eq!(value["tool_use_id"], "toolu_01");
    }

    #[test]
    fn stop_reason_parses_known_and_unknown_values() {
        let reason: StopReason = serde_json::from_str("\"end_turn\"").unwrap();
        assert_eq!(reason, StopReason::EndTurn);

        let reason: StopReason = serde_json::from_str("\"tool_use\"").unwrap();
        assert_eq!(reason, StopReason::ToolUse);

        let reason: StopReason = serde_json::from_str("\"pause_turn\"").unwrap();
        assert_eq!(reason, StopReason::Other);
    }

    #[test]
    fn model_response_decodes_api_shape() {
        let body = json!({
            "id": "msg_01",
            "model": "claude-3-5-sonnet-20241022",
            "role": "assistant",
            "content": [
                { "type": "text", "text": "Let me check the symptom list." },
                { "type": "tool_use", "id": "toolu_01", "name": "get_symptoms", "input": {} }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 120, "output_tokens": 45 }
        });

        let response: ModelResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.content.len(), 2);
        assert_eq!(response.first_text(), Some("Let me check the symptom list."));
        assert_eq!(response.usage.input_tokens, 120);
    }

    #[test]
    fn knowledge_records_decode_upstream_keys() {
        let symptoms: Vec<Symptom> =
            serde_json::from_value(json!([{ "ID": 10, "Name": "Abdominal pain" }])).unwrap();
        assert_eq!(symptoms[0].id, 10);
        assert_eq!(symptoms[0].description, "Abdominal pain");

        let recs: Vec<SpecializationRecommendation> = serde_json::from_value(json!([
            { "ID": 21, "Name": "Gastroenterology", "Accuracy": 87.5 }
        ]))
        .unwrap();
        assert_eq!(recs[0].name, "Gastroenterology");
        assert!((recs[0].confidence - 87.5).abs() < f64::EPSILON);
    }

    #[test]
    fn recommendation_missing_key_is_malformed() {
        let result: Result<Vec<SpecializationRecommendation>, _> =
            serde_json::from_value(json!([{ "ID": 21, "Name": "Gastroenterology" }]));
        assert!(result.is_err());
    }

    #[test]
    fn error_outcome_uses_error_envelope() {
        let outcome = ToolOutcome::error("Unknown tool: frobnicate");
        assert!(outcome.is_error);
        assert_eq!(outcome.content["error"], "Unknown tool: frobnicate");
    }
}
