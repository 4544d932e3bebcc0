//! Tool catalogue settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolsConfig {
    /// JSON tool catalogue in the OpenAI `tools` format. Unset means the
    /// built-in catalogue.
    pub definitions_path: Option<PathBuf>,
    /// Run the calls of one batch concurrently. Results are still
    /// recorded in request order.
    pub parallel: bool,
}
