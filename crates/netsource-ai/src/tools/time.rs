use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use super::{Tool, ToolArgs, ToolError, CURRENT_TIME_TOOL};

/// Reports the local date and time. Takes no arguments.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        CURRENT_TIME_TOOL
    }

    async fn call(&self, _args: &ToolArgs) -> Result<String, ToolError> {
        Ok(format_current_time(Local::now().naive_local()))
    }
}

fn format_current_time(now: NaiveDateTime) -> String {
    format!(
        "The current date and time is: {}",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}
