//! AiClient trait implementation for OpenAiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, ChunkCallback, Message, TokenUsage, ToolDefinition};

use super::client::{build_request_body, error_message, parse_response, parse_usage, OpenAiClient};

impl OpenAiClient {
    /// Map non-success statuses to `AiError`, passing successes through.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!(
                "HTTP {status}: {}",
                error_message(&text)
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        temperature: f64,
    ) -> Result<AiResponse, AiError> {
        let body = build_request_body(&self.config.model, messages, tools, temperature, false);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "chat completion request"
        );

        let response = Self::check_status(self.post(&body).send().await?).await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        parse_response(&json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        temperature: f64,
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        let body = build_request_body(&self.config.model, messages, tools, temperature, true);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            "chat completion streaming request"
        );

        let response = Self::check_status(self.post(&body).send().await?).await?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();
        let mut chunks = 0usize;

        parse_sse_stream(response, |event: SseEvent| {
            if event.is_done() {
                return Ok(());
            }

            let data: serde_json::Value = serde_json::from_str(&event.data)
                .map_err(|e| AiError::ParseError(format!("bad stream chunk: {e}")))?;

            if let Some(message) = data["error"]["message"].as_str() {
                return Err(AiError::ApiError(message.to_string()));
            }

            if let Some(text) = data["choices"][0]["delta"]["content"].as_str() {
                if !text.is_empty() {
                    full_content.push_str(text);
                    chunks += 1;
                    on_chunk(text.to_string());
                }
            }

            if data["usage"].is_object() {
                usage = parse_usage(&data["usage"]);
            }

            Ok(())
        })
        .await?;

        debug!(
            chunks,
            chars = full_content.len(),
            output_tokens = usage.output_tokens,
            "stream finished"
        );

        Ok(AiResponse {
            content: full_content,
            tool_calls: Vec::new(),
            usage,
        })
    }
}
