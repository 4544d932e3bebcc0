//! The per-turn generation loop.

use std::collections::HashSet;

use netsource_common::{new_correlation_id, new_tool_call_id};
use tracing::{debug, info, warn, Instrument};

use crate::{AiClient, ChunkCallback, Message, ToolCall};

use super::manager::Session;
use super::types::{ModelPass, TurnError};

impl Session {
    /// Process one user message and return the assistant's answer.
    pub async fn turn(
        &mut self,
        client: &dyn AiClient,
        user_text: impl Into<String>,
    ) -> Result<String, TurnError> {
        self.turn_streaming(client, user_text, Box::new(|_| {})).await
    }

    /// Like [`Session::turn`], passing answer text to `on_fragment` as it
    /// arrives. A direct answer arrives as a single fragment.
    pub async fn turn_streaming(
        &mut self,
        client: &dyn AiClient,
        user_text: impl Into<String>,
        on_fragment: ChunkCallback,
    ) -> Result<String, TurnError> {
        let span = tracing::info_span!(
            "turn",
            session = %self.id,
            turn = %new_correlation_id(),
            model = %client.model()
        );
        self.run_turn(client, user_text.into(), on_fragment)
            .instrument(span)
            .await
    }

    async fn run_turn(
        &mut self,
        client: &dyn AiClient,
        user_text: String,
        on_fragment: ChunkCallback,
    ) -> Result<String, TurnError> {
        // Nothing reaches the conversation until the last model call succeeds.
        let mut staged = vec![Message::user(user_text)];

        let first = client
            .send_message(
                &self.request_messages(&staged),
                self.executor.definitions(),
                self.temperature,
            )
            .await
            .map_err(|source| TurnError::ModelCallFailed {
                pass: ModelPass::ToolSelection,
                source,
            })?;
        self.tracker.record(client.model(), &first.usage);

        if first.tool_calls.is_empty() {
            debug!("direct answer");
            if !first.content.is_empty() {
                on_fragment(first.content.clone());
            }
            staged.push(Message::assistant(first.content.clone()));
            self.conversation.append_all(staged)?;
            return Ok(first.content);
        }

        let mut calls = first.tool_calls;
        ensure_unique_ids(&mut calls);
        info!(
            calls = calls.len(),
            tools = ?calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "model requested tools"
        );
        staged.push(Message::assistant_tool_calls(calls.clone()));

        let results = self.executor.execute_all(&calls, self.parallel_tools).await;
        for (call, result) in calls.iter().zip(results) {
            debug!(tool = %call.name, status = ?result.status, "tool finished");
            staged.push(Message::tool_result(&call.id, result.to_content()));
        }

        let answer = client
            .send_message_streaming(
                &self.request_messages(&staged),
                &[],
                self.temperature,
                on_fragment,
            )
            .await
            .map_err(|source| TurnError::ModelCallFailed {
                pass: ModelPass::FinalAnswer,
                source,
            })?;
        self.tracker.record(client.model(), &answer.usage);

        staged.push(Message::assistant(answer.content.clone()));
        self.conversation.append_all(staged)?;
        Ok(answer.content)
    }
}

/// Give every call in a batch a distinct, non-empty id so each result can be
/// matched to exactly one declaration.
fn ensure_unique_ids(calls: &mut [ToolCall]) {
    let mut seen = HashSet::new();
    for call in calls.iter_mut() {
        if call.id.is_empty() || !seen.insert(call.id.clone()) {
            let fresh = new_tool_call_id();
            warn!(tool = %call.name, old = %call.id, new = %fresh, "reassigned tool call id");
            call.id = fresh;
            seen.insert(call.id.clone());
        }
    }
}
