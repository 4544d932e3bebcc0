//! Chat session: conversation log plus the two-pass tool-call loop.
//!
//! A turn first asks the model, with the tool catalogue attached, for a
//! complete reply. A plain reply is the answer. Tool calls are executed and
//! their results folded into a second, streamed request made without tools,
//! whose concatenated fragments become the answer.

mod chat;
mod manager;
mod types;


pub use manager::Session;
pub use types::{ModelPass, TurnError};
