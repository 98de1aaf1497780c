//! Tool registry — the closed, discoverable set of capabilities exposed
//! to the model, each with a declarative input contract.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Error raised when a descriptor cannot be registered.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    Duplicate(String),
}

/// Primitive schema types accepted for tool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// A list of integer identifiers.
    IntegerArray,
}

impl ParamType {
    fn json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::IntegerArray => json!({ "type": "array", "items": { "type": "integer" } }),
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone)]
pub struct ToolParam {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
}

impl ToolParam {
    /// A parameter the model must supply.
    pub fn required(name: &str, kind: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: true,
        }
    }

    /// A parameter the model may omit.
    pub fn optional(name: &str, kind: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: false,
        }
    }
}

/// Declarative description of one tool: name, prompt-facing description,
/// and input contract. Authored statically alongside the tool it
/// describes; immutable once registered.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ToolParam>,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, params: Vec<ToolParam>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params,
        }
    }

    /// Names of the parameters the model must supply.
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// JSON-schema object shape for the tool's input.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            let mut property = match param.kind.json_schema() {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            property.insert("description".to_string(), json!(param.description));
            properties.insert(param.name.clone(), Value::Object(property));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Full wire surface presented to the model.
    pub fn to_schema(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.input_schema(),
        })
    }
}

/// Ordered collection of tool descriptors.
///
/// Constructed once at startup and passed by handle wherever tools are
/// enumerated. Registration order is the order schemas are presented to
/// the model. A name can be registered at most once.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, rejecting duplicate names.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), RegistryError> {
        if self.contains(&descriptor.name) {
            return Err(RegistryError::Duplicate(descriptor.name));
        }
        self.tools.push(descriptor);
        Ok(())
    }

    /// Whether a tool with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// Wire schemas for every registered tool, in registration order.
    pub fn schemas(&self) -> Vec<Value> {
        self.tools.iter().map(ToolDescriptor::to_schema).collect()
    }

    /// Registered descriptors, in registration order.
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_tool() -> ToolDescriptor {
        ToolDescriptor::new(
            "get_weather",
            "Get the current weather in a given location",
            vec![
                ToolParam::required("location", ParamType::String, "City and state"),
                ToolParam::optional("unit", ParamType::String, "celsius or fahrenheit"),
            ],
        )
    }

    #[test]
    fn schema_lists_only_non_defaulted_params_as_required() {
        let schema = weather_tool().to_schema();
        assert_eq!(schema["name"], "get_weather");
        assert_eq!(schema["input_schema"]["type"], "object");
        assert_eq!(
            schema["input_schema"]["required"],
            serde_json::json!(["location"])
        );
        assert_eq!(
            schema["input_schema"]["properties"]["unit"]["type"],
            "string"
        );
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new("b_tool", "second letter", Vec::new()))
            .unwrap();
        registry.register(weather_tool()).unwrap();
        registry
            .register(ToolDescriptor::new("a_tool", "first letter", Vec::new()))
            .unwrap();

        let names: Vec<_> = registry
            .schemas()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b_tool", "get_weather", "a_tool"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(weather_tool()).unwrap();

        let err = registry.register(weather_tool()).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "get_weather"));
        assert_eq!(registry.descriptors().len(), 1);
    }

    #[test]
    fn integer_array_params_render_as_typed_arrays() {
        let descriptor = ToolDescriptor::new(
            "lookup",
            "Look up records",
            vec![ToolParam::required(
                "ids",
                ParamType::IntegerArray,
                "Record ids",
            )],
        );
        let schema = descriptor.input_schema();
        assert_eq!(schema["properties"]["ids"]["type"], "array");
        assert_eq!(schema["properties"]["ids"]["items"]["type"], "integer");
    }
}
