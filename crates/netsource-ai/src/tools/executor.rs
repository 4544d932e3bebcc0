//! Turns raw model tool calls into `ToolResult`s.

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{ToolCall, ToolDefinition};

use super::{ToolArgs, ToolError, ToolRegistry, ToolResult};

/// Result message for an unknown tool or a missing required argument.
pub const NOT_ALL_VARIABLES_PROVIDED: &str = "Error: not all variables have been provided.";

/// Runs tool calls against a registry. Every outcome, including unknown
/// tools, malformed arguments and tool failures, becomes a `ToolResult`.
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        self.registry.definitions()
    }

    /// Execute one call. Never fails.
    pub async fn execute(&self, name: &str, raw_arguments: &str) -> ToolResult {
        let args = parse_arguments(name, raw_arguments);

        let Some(tool) = self.registry.get(name) else {
            warn!(tool = %name, "model requested an unknown tool");
            return ToolResult::error(NOT_ALL_VARIABLES_PROVIDED);
        };

        debug!(tool = %name, "executing tool");
        match tool.call(&args).await {
            Ok(output) => ToolResult::success(output),
            Err(ToolError::MissingArgument(key)) => {
                warn!(tool = %name, argument = %key, "tool call is missing a required argument");
                ToolResult::error(NOT_ALL_VARIABLES_PROVIDED)
            }
            Err(e) => {
                warn!(tool = %name, "tool failed: {e}");
                ToolResult::error(e.to_string())
            }
        }
    }

    /// Execute a batch, returning results in request order.
    ///
    /// With `parallel` the calls run concurrently; otherwise one at a time.
    pub async fn execute_all(&self, calls: &[ToolCall], parallel: bool) -> Vec<ToolResult> {
        if parallel {
            return join_all(
                calls
                    .iter()
                    .map(|call| self.execute(&call.name, &call.arguments)),
            )
            .await;
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.execute(&call.name, &call.arguments).await);
        }
        results
    }
}

/// Best-effort argument parsing: anything but a JSON object becomes an
/// empty mapping.
fn parse_arguments(name: &str, raw: &str) -> ToolArgs {
    if raw.trim().is_empty() {
        return ToolArgs::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(tool = %name, "tool arguments are not an object: {other}");
            ToolArgs::new()
        }
        Err(e) => {
            warn!(tool = %name, "error retrieving arguments: {e}");
            ToolArgs::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{builtin_tools, CurrentTimeTool, Tool, ToolStatus, CURRENT_TIME_TOOL};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Echoes its `query` argument.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        async fn call(&self, args: &ToolArgs) -> Result<String, ToolError> {
            Ok(format!("echo: {}", crate::tools::required_str(args, "query")?))
        }
    }

    /// Always fails with a provider error.
    struct BrokenTool;

    #[async_trait]
    impl Tool for BrokenTool {
        fn name(&self) -> &str {
            "broken"
        }

        async fn call(&self, _args: &ToolArgs) -> Result<String, ToolError> {
            Err(ToolError::Provider("Search error: connection reset".into()))
        }
    }

    /// Counts invocations, for ordering checks.
    struct CountingTool {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn name(&self) -> &str {
            self.name
        }

        async fn call(&self, _args: &ToolArgs) -> Result<String, ToolError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} #{n}", self.name))
        }
    }

    fn executor() -> ToolExecutor {
        let mut registry = ToolRegistry::new(builtin_tools());
        registry.register(EchoTool);
        registry.register(BrokenTool);
        registry.register(CurrentTimeTool);
        ToolExecutor::new(registry)
    }

    fn call(id: &str, name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    #[tokio::test]
    async fn known_tool_succeeds() {
        let result = executor().execute("echo", r#"{"query": "rust"}"#).await;
        assert_eq!(result, ToolResult::success("echo: rust"));
    }

    #[tokio::test]
    async fn unknown_tool_returns_sentinel() {
        let result = executor().execute("launch_rockets", "{}").await;
        assert_eq!(result.message, "Error: not all variables have been provided.");
        assert_eq!(result.status, ToolStatus::Error);
    }

    #[tokio::test]
    async fn missing_argument_returns_sentinel() {
        let result = executor().execute("echo", r#"{"q": "rust"}"#).await;
        assert_eq!(result.message, NOT_ALL_VARIABLES_PROVIDED);
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn malformed_arguments_fall_back_to_empty_mapping() {
        // A tool without parameters still runs.
        let result = executor().execute(CURRENT_TIME_TOOL, "{not json").await;
        assert!(result.is_success());
        assert!(result.message.starts_with("The current date and time is: "));

        // A tool with parameters degrades to the missing-argument sentinel.
        let result = executor().execute("echo", "{not json").await;
        assert_eq!(result.message, NOT_ALL_VARIABLES_PROVIDED);

        let result = executor().execute("echo", "[1, 2, 3]").await;
        assert_eq!(result.message, NOT_ALL_VARIABLES_PROVIDED);
    }

    #[tokio::test]
    async fn empty_arguments_are_an_empty_mapping() {
        let result = executor().execute(CURRENT_TIME_TOOL, "").await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn tool_failure_is_absorbed() {
        let result = executor().execute("broken", "{}").await;
        assert_eq!(result, ToolResult::error("Search error: connection reset"));
    }

    #[tokio::test]
    async fn batch_keeps_order_and_survives_failures() {
        let calls = vec![
            call("a", "broken", "{}"),
            call("b", "echo", r#"{"query": "one"}"#),
            call("c", "nope", "{}"),
            call("d", "echo", r#"{"query": "two"}"#),
        ];
        for parallel in [false, true] {
            let results = executor().execute_all(&calls, parallel).await;
            assert_eq!(results.len(), 4);
            assert!(!results[0].is_success());
            assert_eq!(results[1].message, "echo: one");
            assert_eq!(results[2].message, NOT_ALL_VARIABLES_PROVIDED);
            assert_eq!(results[3].message, "echo: two");
        }
    }

    #[tokio::test]
    async fn sequential_batch_runs_in_request_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::default();
        registry.register(CountingTool {
            name: "first",
            calls: Arc::clone(&counter),
        });
        registry.register(CountingTool {
            name: "second",
            calls: Arc::clone(&counter),
        });
        let executor = ToolExecutor::new(registry);

        let results = executor
            .execute_all(&[call("1", "second", "{}"), call("2", "first", "{}")], false)
            .await;
        assert_eq!(results[0].message, "second #0");
        assert_eq!(results[1].message, "first #1");
    }
}
