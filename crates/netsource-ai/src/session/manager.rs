//! Session struct and conversation management.

use netsource_common::SessionId;

use crate::conversation::Conversation;
use crate::token_tracker::TokenTracker;
use crate::tools::ToolExecutor;
use crate::{Message, ToolDefinition};

pub(crate) const MIN_TEMPERATURE: f64 = 0.0;
pub(crate) const MAX_TEMPERATURE: f64 = 2.0;

/// One user's dialogue with the model.
///
/// Turns take `&mut self`, so a session never runs two turns at once.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) conversation: Conversation,
    pub(super) executor: ToolExecutor,
    pub(super) temperature: f64,
    /// Run a batch of tool calls concurrently instead of one by one.
    pub(super) parallel_tools: bool,
    pub(super) tracker: TokenTracker,
}

impl Session {
    pub fn new(system_prompt: impl Into<String>, executor: ToolExecutor) -> Self {
        Self {
            id: SessionId::new(),
            conversation: Conversation::new(system_prompt),
            executor,
            temperature: 0.7,
            parallel_tools: false,
            tracker: TokenTracker::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.set_temperature(temperature);
        self
    }

    pub fn with_parallel_tools(mut self, parallel: bool) -> Self {
        self.parallel_tools = parallel;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Full conversation, system prompt first.
    pub fn history(&self) -> &[Message] {
        self.conversation.snapshot()
    }

    pub fn message_count(&self) -> usize {
        self.conversation.message_count()
    }

    /// Forget everything but the system prompt. Token usage is kept.
    pub fn reset(&mut self) {
        self.conversation.reset();
    }

    pub fn usage(&self) -> &TokenTracker {
        &self.tracker
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Set the sampling temperature, clamped to the range providers accept.
    /// Returns the value actually applied.
    pub fn set_temperature(&mut self, temperature: f64) -> f64 {
        self.temperature = if temperature.is_nan() {
            self.temperature
        } else {
            temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        };
        self.temperature
    }

    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        self.executor.definitions()
    }

    /// Conversation followed by the not yet committed messages of a turn.
    pub(super) fn request_messages(&self, staged: &[Message]) -> Vec<Message> {
        let history = self.conversation.snapshot();
        let mut messages = Vec::with_capacity(history.len() + staged.len());
        messages.extend_from_slice(history);
        messages.extend_from_slice(staged);
        messages
    }
}
