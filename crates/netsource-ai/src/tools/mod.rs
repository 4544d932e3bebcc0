//! Research tools the model can call.
//!
//! A `ToolRegistry` pairs the schema catalogue sent to the model with a
//! dispatch table of `Tool` callables. The `ToolExecutor` turns a raw
//! model tool call into a `ToolResult` and never fails.

mod definitions;
mod executor;
mod registry;
mod text;
mod time;
mod web_search;
mod wikipedia;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use netsource_config::SearchConfig;

pub use definitions::{
    builtin_tools, load_catalogue, to_openai_tool, CURRENT_TIME_TOOL, WEB_SEARCH_TOOL,
    WIKIPEDIA_TOOL,
};
pub use executor::{ToolExecutor, NOT_ALL_VARIABLES_PROVIDED};
pub use registry::ToolRegistry;
pub use time::CurrentTimeTool;
pub use web_search::{SearchHit, WebSearchTool};
pub use wikipedia::{WikiPage, WikipediaTool};

/// Parsed tool-call arguments.
pub type ToolArgs = serde_json::Map<String, Value>;

/// User agent sent by the search tools; some providers reject anonymous clients.
pub(crate) const USER_AGENT: &str = concat!("netsource/", env!("CARGO_PKG_VERSION"));

/// A capability the model can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Run the tool and return the text handed back to the model.
    async fn call(&self, args: &ToolArgs) -> Result<String, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("missing argument `{0}`")]
    MissingArgument(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Provider(String),
}

/// Fetch a required argument as text.
///
/// Non-string scalars are accepted in their JSON form, since models
/// occasionally send `{"query": 42}`.
pub fn required_str(args: &ToolArgs, key: &str) -> Result<String, ToolError> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(ToolError::MissingArgument(key.to_string())),
        Some(other) => Ok(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Outcome of one tool call, sent to the model as the `tool` message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub status: ToolStatus,
    pub message: String,
}

impl ToolResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    /// `{"status": ..., "message": ...}` as a JSON string.
    pub fn to_content(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Registry with the three built-in research tools wired to `search`
/// settings and described by `definitions`.
pub fn builtin_registry(
    search: &SearchConfig,
    definitions: Vec<crate::ToolDefinition>,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new(definitions);
    registry.register(CurrentTimeTool);
    registry.register(WebSearchTool::new(search)?);
    registry.register(WikipediaTool::new(search)?);
    registry.warn_unbacked_definitions();
    Ok(registry)
}
