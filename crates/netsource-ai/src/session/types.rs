//! Turn-level outcomes.

use std::fmt;

use crate::conversation::ConversationError;
use crate::AiError;

/// Which of the two model requests of a turn failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPass {
    /// Non-streamed request with tools attached.
    ToolSelection,
    /// Streamed request over the tool results, without tools.
    FinalAnswer,
}

impl fmt::Display for ModelPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelPass::ToolSelection => write!(f, "tool selection"),
            ModelPass::FinalAnswer => write!(f, "final answer"),
        }
    }
}

/// A turn that produced no answer. The conversation is left as it was
/// before the turn began.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("model call failed during {pass}: {source}")]
    ModelCallFailed {
        pass: ModelPass,
        #[source]
        source: AiError,
    },
    #[error("conversation protocol violation: {0}")]
    Protocol(#[from] ConversationError),
}
