//! Tool catalogue: the schemas the model sees.

use std::path::Path;

use netsource_common::ConfigError;
use serde_json::{json, Value};
use tracing::info;

use crate::ToolDefinition;

pub const WEB_SEARCH_TOOL: &str = "fetch_internet_information";
pub const WIKIPEDIA_TOOL: &str = "fetch_wikipedia_information";
pub const CURRENT_TIME_TOOL: &str = "get_current_date_and_time";

/// The built-in catalogue, used when no catalogue file is configured.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: WEB_SEARCH_TOOL.to_string(),
            description: "Search the internet for up-to-date information and return the top \
                          results with a short summary of each page."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The web search query"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: WIKIPEDIA_TOOL.to_string(),
            description: "Search Wikipedia and return the title, URL and introduction of the \
                          best matching articles."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "wikipedia_query": {
                        "type": "string",
                        "description": "The subject to look up on Wikipedia"
                    }
                },
                "required": ["wikipedia_query"]
            }),
        },
        ToolDefinition {
            name: CURRENT_TIME_TOOL.to_string(),
            description: "Get the current local date and time.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
    ]
}

/// Convert a tool definition to the OpenAI `tools` entry format.
pub fn to_openai_tool(tool: &ToolDefinition) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

/// Load a JSON catalogue file.
///
/// Accepts a JSON array whose entries are either OpenAI `tools` entries
/// (`{"type": "function", "function": {...}}`) or bare
/// `{"name", "description", "parameters"}` objects.
pub fn load_catalogue(path: &Path) -> Result<Vec<ToolDefinition>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;
    let tools = parse_catalogue(&content)?;
    info!(count = tools.len(), "loaded tool catalogue from {}", path.display());
    Ok(tools)
}

fn parse_catalogue(content: &str) -> Result<Vec<ToolDefinition>, ConfigError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("invalid tool catalogue JSON: {e}")))?;
    let entries = json
        .as_array()
        .ok_or_else(|| ConfigError::ParseError("tool catalogue must be a JSON array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let function = entry.get("function").unwrap_or(entry);
            let name = function["name"]
                .as_str()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    ConfigError::ValidationError(format!("tool catalogue entry {i} has no name"))
                })?;
            Ok(ToolDefinition {
                name: name.to_string(),
                description: function["description"].as_str().unwrap_or_default().to_string(),
                parameters: match &function["parameters"] {
                    Value::Null => json!({"type": "object", "properties": {}}),
                    params => params.clone(),
                },
            })
        })
        .collect()
}
