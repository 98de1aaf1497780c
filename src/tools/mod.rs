//! Tools exposed to the chat model: registry, dispatch, and the built-in
//! medical tool definitions.

pub mod dispatch;
pub mod registry;

pub use dispatch::ToolDispatcher;
pub use registry::{ParamType, RegistryError, ToolDescriptor, ToolParam, ToolRegistry};

/// Name of the symptom catalog tool.
pub const GET_SYMPTOMS: &str = "get_symptoms";

/// Name of the specialization recommendation tool.
pub const GET_SPECIALIZATIONS: &str = "get_specializations";

// The descriptions double as prompt material for the model, so they spell
// out when each tool applies rather than just what it returns.

const GET_SYMPTOMS_DESCRIPTION: &str = "\
Retrieves a comprehensive list of medical symptoms from the database.
This tool should be used when:
1. The user asks about available symptoms
2. You need to look up specific symptom information
3. You're helping diagnose a condition and need to check symptoms

The tool returns a list of symptoms with their IDs and detailed descriptions.
Note: This tool does not diagnose conditions, it only provides symptom information.";

const GET_SPECIALIZATIONS_DESCRIPTION: &str = "\
Recommends medical specializations based on symptoms and patient information.
This tool should be used when:
1. A user describes specific symptoms and needs specialist recommendations
2. You need to determine which type of doctor would be most appropriate

Required parameters:
- symptom_ids: List of symptom IDs from the get_symptoms tool
- age: Patient's age (important for age-specific recommendations)
- gender: Patient's gender (relevant for certain specializations)

The tool returns a ranked list of medical specializations with confidence scores.
Note: These are suggestions only and not definitive medical advice.";

/// Build the registry holding the two built-in medical tools.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();

    registry.register(ToolDescriptor::new(
        GET_SYMPTOMS,
        GET_SYMPTOMS_DESCRIPTION,
        Vec::new(),
    ))?;

    registry.register(ToolDescriptor::new(
        GET_SPECIALIZATIONS,
        GET_SPECIALIZATIONS_DESCRIPTION,
        vec![
            ToolParam::required(
                "symptom_ids",
                ParamType::IntegerArray,
                "List of symptom IDs to analyze",
            ),
            ToolParam::required("age", ParamType::Integer, "Patient's age"),
            ToolParam::required(
                "gender",
                ParamType::String,
                "Patient's gender (male/female)",
            ),
        ],
    ))?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_exposes_both_tools_in_order() {
        let registry = builtin_registry().unwrap();
        let schemas = registry.schemas();

        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["name"], GET_SYMPTOMS);
        assert_eq!(schemas[1]["name"], GET_SPECIALIZATIONS);
    }

    #[test]
    fn symptom_tool_takes_no_parameters() {
        let registry = builtin_registry().unwrap();
        let schema = &registry.schemas()[0];

        assert_eq!(schema["input_schema"]["required"], serde_json::json!([]));
        assert!(schema["input_schema"]["properties"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn specialization_tool_requires_all_three_parameters() {
        let registry = builtin_registry().unwrap();
        let descriptor = &registry.descriptors()[1];

        assert_eq!(
            descriptor.required_params(),
            vec!["symptom_ids", "age", "gender"]
        );

        let schema = descriptor.input_schema();
        assert_eq!(schema["properties"]["symptom_ids"]["type"], "array");
        assert_eq!(schema["properties"]["age"]["type"], "integer");
        assert_eq!(schema["properties"]["gender"]["type"], "string");
    }
}
