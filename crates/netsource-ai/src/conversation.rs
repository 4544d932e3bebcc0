//! Append-only conversation log.
//!
//! The log always starts with the system prompt and only ever grows,
//! except through [`Conversation::reset`]. Appends are checked against the
//! tool-calling protocol: every `tool` message must answer a call declared
//! by the preceding assistant message, in declaration order, and no other
//! message may be recorded while calls are still unanswered.

use std::collections::VecDeque;

use crate::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error("the conversation already has a system message")]
    DuplicateSystemMessage,
    #[error("tool message has no tool_call_id")]
    MissingToolCallId,
    #[error("tool result {0} does not answer any pending tool call")]
    UnknownToolCallId(String),
    #[error("tool result {got} arrived before {expected}")]
    OutOfOrderToolResult { expected: String, got: String },
    #[error("tool call id {0} is declared twice")]
    DuplicateToolCallId(String),
    #[error("{0} tool call(s) are still unanswered")]
    UnansweredToolCalls(usize),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    /// Ids declared by the latest assistant tool-call message that have no
    /// result yet, in declaration order.
    pending_calls: VecDeque<String>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            pending_calls: VecDeque::new(),
        }
    }

    /// Record one message.
    pub fn append(&mut self, message: Message) -> Result<(), ConversationError> {
        check(&mut self.pending_calls, &message)?;
        self.messages.push(message);
        Ok(())
    }

    /// Record several messages, all or none.
    pub fn append_all(&mut self, messages: Vec<Message>) -> Result<(), ConversationError> {
        let mut pending = self.pending_calls.clone();
        for message in &messages {
            check(&mut pending, message)?;
        }
        self.pending_calls = pending;
        self.messages.extend(messages);
        Ok(())
    }

    /// Drop everything but the system prompt.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
        self.pending_calls.clear();
    }

    /// Ordered view of the log, as sent to the model.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn system_message(&self) -> &Message {
        &self.messages[0]
    }

    /// Whether the latest tool-call batch still awaits results.
    pub fn has_pending_tool_calls(&self) -> bool {
        !self.pending_calls.is_empty()
    }
}

fn check(pending: &mut VecDeque<String>, message: &Message) -> Result<(), ConversationError> {
    match message.role {
        Role::System => Err(ConversationError::DuplicateSystemMessage),
        Role::Tool => {
            let id = message
                .tool_call_id
                .as_deref()
                .ok_or(ConversationError::MissingToolCallId)?;
            match pending.front() {
                Some(expected) if expected == id => {
                    pending.pop_front();
                    Ok(())
                }
                Some(expected) if pending.iter().any(|p| p == id) => {
                    Err(ConversationError::OutOfOrderToolResult {
                        expected: expected.clone(),
                        got: id.to_string(),
                    })
                }
                _ => Err(ConversationError::UnknownToolCallId(id.to_string())),
            }
        }
        Role::User | Role::Assistant => {
            if !pending.is_empty() {
                return Err(ConversationError::UnansweredToolCalls(pending.len()));
            }
            for (i, call) in message.tool_calls.iter().enumerate() {
                if message.tool_calls[..i].iter().any(|c| c.id == call.id) {
                    return Err(ConversationError::DuplicateToolCallId(call.id.clone()));
                }
            }
            pending.extend(message.tool_calls.iter().map(|c| c.id.clone()));
            Ok(())
        }
    }
}
