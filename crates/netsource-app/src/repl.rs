//! Line-oriented chat front-end.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use netsource_ai::{AiClient, Message, Role, Session, TurnError};

use crate::speech::Speaker;

const HELP: &str = "\
Commands:
  /reset, /clear     forget the conversation
  /temp [value]      show or set the temperature (0.0-2.0)
  /voice [on|off]    show or toggle spoken answers
  /usage             token usage so far
  /history           print the conversation
  /help              this help
  /quit, /exit       leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask(String),
    Reset,
    Temperature(Option<f64>),
    Voice(Option<bool>),
    Usage,
    History,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim())),
        None => (rest, None),
    };
    match (name, arg) {
        ("reset" | "clear", _) => Command::Reset,
        ("temp" | "temperature", None) => Command::Temperature(None),
        ("temp" | "temperature", Some(value)) => match value.parse::<f64>() {
            Ok(t) if t.is_finite() => Command::Temperature(Some(t)),
            _ => Command::Invalid(format!("not a temperature: {value}")),
        },
        ("voice", None) => Command::Voice(None),
        ("voice", Some("on")) => Command::Voice(Some(true)),
        ("voice", Some("off")) => Command::Voice(Some(false)),
        ("voice", Some(other)) => Command::Invalid(format!("expected on or off, got {other}")),
        ("usage", _) => Command::Usage,
        ("history", _) => Command::History,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        _ => Command::Invalid(format!("unknown command /{name}, try /help")),
    }
}

pub struct Repl {
    session: Session,
    client: Box<dyn AiClient>,
    speaker: Box<dyn Speaker>,
    voice: bool,
    title: String,
}

impl Repl {
    pub fn new(
        session: Session,
        client: Box<dyn AiClient>,
        speaker: Box<dyn Speaker>,
        voice: bool,
        title: impl Into<String>,
    ) -> Self {
        Self {
            session,
            client,
            speaker,
            voice,
            title: title.into(),
        }
    }

    /// Interactive loop until `/quit` or end of input.
    pub async fn run(&mut self) -> netsource_common::Result<()> {
        println!("{} (model: {}). Type /help for commands.", self.title, self.client.model());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };
            match parse_command(&line) {
                Command::Ask(question) => {
                    // Failures are reported; the conversation is unchanged.
                    if let Err(e) = self.ask(&question).await {
                        eprintln!("error: {e}");
                    }
                }
                Command::Reset => {
                    self.session.reset();
                    println!("Conversation cleared.");
                }
                Command::Temperature(None) => println!("temperature: {}", self.session.temperature()),
                Command::Temperature(Some(t)) => {
                    let applied = self.session.set_temperature(t);
                    println!("temperature: {applied}");
                }
                Command::Voice(None) => println!("voice: {}", on_off(self.voice)),
                Command::Voice(Some(on)) => {
                    self.voice = on;
                    println!("voice: {}", on_off(on));
                }
                Command::Usage => println!("{}", self.session.usage()),
                Command::History => print_history(self.session.history()),
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::Empty => {}
                Command::Invalid(msg) => eprintln!("{msg}"),
            }
        }

        info!(usage = %self.session.usage(), "chat finished");
        Ok(())
    }

    /// One turn: stream the answer to stdout, then speak it if enabled.
    pub async fn ask(&mut self, question: &str) -> Result<(), TurnError> {
        eprintln!("({} is thinking...)", self.title);

        let answer = self
            .session
            .turn_streaming(
                self.client.as_ref(),
                question,
                Box::new(|fragment| {
                    let mut out = std::io::stdout().lock();
                    let _ = out.write_all(fragment.as_bytes());
                    let _ = out.flush();
                }),
            )
            .await?;
        println!();

        if self.voice {
            if let Err(e) = self.speaker.speak(&answer).await {
                warn!("speech failed: {e}");
            }
        }
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn print_history(messages: &[Message]) {
    for message in messages {
        match message.role {
            Role::Assistant if !message.tool_calls.is_empty() => {
                for call in &message.tool_calls {
                    println!("[assistant] calls {}({})", call.name, call.arguments);
                }
            }
            Role::Tool => println!(
                "[tool {}] {}",
                message.tool_call_id.as_deref().unwrap_or("?"),
                message.content()
            ),
            role => println!("[{}] {}", role.as_str(), message.content()),
        }
    }
}
