//! Name → callable dispatch table plus the schema catalogue.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::ToolDefinition;

use super::Tool;

/// Tools the model may call, keyed by name.
///
/// The catalogue and the dispatch table are kept separately: the catalogue
/// is what the model is told about, the table is what can actually run.
/// A name the table lacks is not dispatchable, even if the catalogue lists it.
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(definitions: Vec<ToolDefinition>) -> Self {
        Self {
            definitions,
            tools: HashMap::new(),
        }
    }

    /// Add a callable, replacing any previous one with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Box::new(tool)).is_some() {
            debug!(tool = %name, "replaced registered tool");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Schema catalogue passed to the model.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Registered callable names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Log catalogue entries the model can see but nothing can run.
    pub fn warn_unbacked_definitions(&self) {
        for def in &self.definitions {
            if !self.tools.contains_key(&def.name) {
                warn!(tool = %def.name, "catalogue lists a tool with no implementation");
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{builtin_tools, CurrentTimeTool, CURRENT_TIME_TOOL};

    #[test]
    fn registered_tool_is_dispatchable() {
        let mut registry = ToolRegistry::new(builtin_tools());
        assert!(registry.is_empty());
        registry.register(CurrentTimeTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(CURRENT_TIME_TOOL).is_some());
        assert_eq!(registry.names(), vec![CURRENT_TIME_TOOL]);
    }

    #[test]
    fn catalogue_entry_alone_is_not_dispatchable() {
        let registry = ToolRegistry::new(builtin_tools());
        assert_eq!(registry.definitions().len(), 3);
        assert!(registry.get("fetch_internet_information").is_none());
        assert!(registry.get("delete_everything").is_none());
    }

    #[test]
    fn registering_twice_replaces() {
        let mut registry = ToolRegistry::default();
        registry.register(CurrentTimeTool);
        registry.register(CurrentTimeTool);
        assert_eq!(registry.len(), 1);
    }
}
