//! OpenAI-compatible chat-completion client.
//!
//! Implements the `AiClient` trait against `POST {base_url}/chat/completions`,
//! the wire format shared by OpenAI, OpenRouter, Ollama, vLLM and most
//! hosted providers.

mod api;
mod client;
mod config;


pub use client::{build_request_body, parse_response, OpenAiClient};
pub use config::OpenAiConfig;
