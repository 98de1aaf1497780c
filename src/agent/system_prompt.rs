//! System prompt loading.
//!
//! The prompt ships as a YAML file with a single `system_prompt` key so it
//! can be edited and reloaded without recompiling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prompt written by `medassist init`.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a careful medical symptom assistant. Your job is to help users
figure out which kind of medical specialist to see, never to diagnose.

Workflow:
1. When a user describes complaints, call get_symptoms and match their
   free-text description against the catalog to find symptom IDs.
2. Ask for the user's age and gender if they have not provided them.
3. Call get_specializations with the matched symptom IDs, age, and gender.
4. Present the recommended specializations with their confidence scores,
   in plain language.

Always remind the user that these are suggestions, not medical advice,
and that they should consult a doctor for a diagnosis. If symptoms sound
urgent or life-threatening, tell the user to seek emergency care
immediately instead of continuing the conversation.";

/// YAML structure of the prompt file.
#[derive(Debug, Serialize, Deserialize)]
struct PromptFile {
    system_prompt: String,
}

/// Load the system prompt from a YAML file.
pub fn load_system_prompt(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
    let file: PromptFile =
        serde_yaml::from_str(&contents).context("Failed to parse prompt file (YAML)")?;
    Ok(file.system_prompt)
}

/// Write the default prompt file (used by `init`).
pub fn write_default_prompt(path: &Path) -> Result<()> {
    let contents = serde_yaml::to_string(&PromptFile {
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
    })
    .context("Failed to serialize prompt file")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write prompt file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.yaml");

        write_default_prompt(&path).unwrap();
        let prompt = load_system_prompt(&path).unwrap();
        assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_system_prompt(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn file_without_prompt_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.yaml");
        std::fs::write(&path, "greeting: hello\n").unwrap();
        assert!(load_system_prompt(&path).is_err());
    }
}
