//! OpenAI client struct, request building, and response parsing.

use serde_json::{json, Value};

use netsource_common::new_tool_call_id;

use crate::tools::to_openai_tool;
use crate::{AiError, AiResponse, Message, TokenUsage, ToolCall, ToolDefinition};

use super::config::OpenAiConfig;

/// OpenAI-compatible API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Start a POST to the completions endpoint with auth headers set.
    pub(crate) fn post(&self, body: &Value) -> reqwest::RequestBuilder {
        let request = self
            .http
            .post(self.config.completions_url())
            .header("content-type", "application/json")
            .json(body);
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Build the JSON request body for `chat/completions`.
///
/// `tools` is omitted entirely when empty; some providers reject an empty
/// array.
pub fn build_request_body(
    model: &str,
    messages: &[Message],
    tools: &[ToolDefinition],
    temperature: f64,
    stream: bool,
) -> Value {
    let msgs: Vec<Value> = messages.iter().map(message_to_json).collect();

    let mut body = json!({
        "model": model,
        "messages": msgs,
        "temperature": temperature,
    });

    if !tools.is_empty() {
        let tool_defs: Vec<Value> = tools.iter().map(to_openai_tool).collect();
        body["tools"] = json!(tool_defs);
    }

    if stream {
        body["stream"] = json!(true);
        body["stream_options"] = json!({ "include_usage": true });
    }

    body
}

fn message_to_json(msg: &Message) -> Value {
    let mut value = json!({ "role": msg.role.as_str() });

    if let Some(content) = &msg.content {
        value["content"] = json!(content);
    }
    if !msg.tool_calls.is_empty() {
        let calls: Vec<Value> = msg.tool_calls.iter().map(tool_call_to_json).collect();
        value["tool_calls"] = json!(calls);
    }
    if let Some(id) = &msg.tool_call_id {
        value["tool_call_id"] = json!(id);
    }

    value
}

fn tool_call_to_json(call: &ToolCall) -> Value {
    json!({
        "id": call.id,
        "type": "function",
        "function": {
            "name": call.name,
            "arguments": call.arguments,
        }
    })
}

/// Parse a non-streaming `chat/completions` response.
pub fn parse_response(json: &Value) -> Result<AiResponse, AiError> {
    let message = json["choices"]
        .get(0)
        .map(|choice| &choice["message"])
        .ok_or_else(|| AiError::ParseError("response has no choices".into()))?;

    let content = message["content"].as_str().unwrap_or_default().to_string();

    let tool_calls = message["tool_calls"]
        .as_array()
        .map(|calls| calls.iter().map(parse_tool_call).collect())
        .unwrap_or_default();

    Ok(AiResponse {
        content,
        tool_calls,
        usage: parse_usage(&json["usage"]),
    })
}

fn parse_tool_call(call: &Value) -> ToolCall {
    let id = call["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(new_tool_call_id);

    // The protocol sends a JSON string; a few servers send the object itself.
    let arguments = match &call["function"]["arguments"] {
        Value::String(raw) => raw.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    ToolCall {
        id,
        name: call["function"]["name"].as_str().unwrap_or_default().to_string(),
        arguments,
    }
}

pub(crate) fn parse_usage(usage: &Value) -> TokenUsage {
    TokenUsage {
        input_tokens: usage["prompt_tokens"].as_u64().unwrap_or(0),
        output_tokens: usage["completion_tokens"].as_u64().unwrap_or(0),
    }
}

/// Pull a readable message out of an error response body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
