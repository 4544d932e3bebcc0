use std::path::PathBuf;

use clap::Parser;

/// NetSourceAI: a terminal research assistant that answers with help from
/// web search, Wikipedia and the clock.
#[derive(Parser, Debug)]
#[command(name = "netsource", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Sampling temperature for this run (0.0-2.0).
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Speak answers aloud.
    #[arg(long)]
    pub voice: bool,

    /// Ask a single question, print the answer and exit.
    #[arg(short, long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_question() {
        let args = Args::try_parse_from(["netsource", "--ask", "What time is it?", "-t", "0.2"])
            .unwrap();
        assert_eq!(args.ask.as_deref(), Some("What time is it?"));
        assert_eq!(args.temperature, Some(0.2));
        assert!(!args.voice);
    }

    #[test]
    fn defaults_to_interactive() {
        let args = Args::try_parse_from(["netsource"]).unwrap();
        assert!(args.ask.is_none());
        assert!(args.config.is_none());
        assert!(!args.print_config);
    }
}
