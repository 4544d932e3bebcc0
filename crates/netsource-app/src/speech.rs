//! Spoken answers through an external text-to-speech command.

use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use netsource_common::NetsourceError;
use netsource_config::SpeechConfig;

#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> netsource_common::Result<()>;
}

/// Writes the answer to the stdin of a TTS program such as `espeak`.
pub struct CommandSpeaker {
    command: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn from_settings(settings: &SpeechConfig) -> Self {
        Self {
            command: settings.command.clone(),
            args: settings.args.clone(),
        }
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> netsource_common::Result<()> {
        let text = strip_markdown(text);
        if text.is_empty() {
            return Ok(());
        }

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| NetsourceError::Speech(format!("cannot start {}: {e}", self.command)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(NetsourceError::Speech(format!(
                "{} exited with {status}",
                self.command
            )));
        }
        debug!(chars = text.len(), "answer spoken");
        Ok(())
    }
}

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*```.*$").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*#{1,6}\s+").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`~]+").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Plain text suitable for a speech engine.
pub fn strip_markdown(text: &str) -> String {
    let text = FENCE_RE.replace_all(text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HEADING_RE.replace_all(&text, "");
    let text = BULLET_RE.replace_all(&text, "");
    let text = EMPHASIS_RE.replace_all(&text, "");
    BLANK_LINES_RE.replace_all(text.trim(), "\n").into_owned()
}
