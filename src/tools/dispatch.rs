//! Tool dispatch — turns a model-issued tool-use request into a concrete
//! knowledge-service call with validated arguments.

use super::{ToolRegistry, GET_SPECIALIZATIONS, GET_SYMPTOMS};
use crate::knowledge::KnowledgeService;
use crate::types::ToolOutcome;
use anyhow::{anyhow, bail, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Executes registered tools against the knowledge service.
pub struct ToolDispatcher {
    service: Arc<dyn KnowledgeService>,
}

impl ToolDispatcher {
    pub fn new(service: Arc<dyn KnowledgeService>) -> Self {
        Self { service }
    }

    /// Execute one tool call.
    ///
    /// Always resolves to exactly one outcome. Validation failures are
    /// reported without touching the service; every failure is folded
    /// into the outcome envelope rather than returned as an error.
    pub async fn execute(&self, registry: &ToolRegistry, name: &str, args: &Value) -> ToolOutcome {
        if !registry.contains(name) {
            return ToolOutcome::error(format!("Unknown tool: {name}"));
        }

        debug!("Executing tool '{}' with args: {}", name, args);

        let result = match name {
            GET_SYMPTOMS => self.get_symptoms().await,
            GET_SPECIALIZATIONS => self.get_specializations(args).await,
            other => return ToolOutcome::error(format!("Unknown tool: {other}")),
        };

        match result {
            Ok(content) => ToolOutcome::ok(content),
            Err(e) => ToolOutcome::error(format!("Tool execution failed: {e}")),
        }
    }

    async fn get_symptoms(&self) -> Result<Value> {
        let symptoms = self.service.list_symptoms().await?;
        Ok(json!({ "symptoms": symptoms }))
    }

    async fn get_specializations(&self, args: &Value) -> Result<Value> {
        let ids = args
            .get("symptom_ids")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("missing required argument 'symptom_ids'"))?;
        if ids.is_empty() {
            bail!("'symptom_ids' must be a non-empty list");
        }
        let symptom_ids: Vec<i64> = ids
            .iter()
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| anyhow!("'symptom_ids' entries must be integers"))
            })
            .collect::<Result<_>>()?;

        let age = args
            .get("age")
            .and_then(Value::as_u64)
            .ok_or_else(|| anyhow!("missing required argument 'age'"))? as u32;

        // Normalize before the service sees it; the upstream API only
        // accepts lower-case gender values.
        let gender = args
            .get("gender")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("missing required argument 'gender'"))?
            .to_lowercase();

        let specializations = self
            .service
            .recommend_specializations(&symptom_ids, age, &gender)
            .await?;

        Ok(json!({ "specializations": specializations }))
    }
}
