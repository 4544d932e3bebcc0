mod cli;
mod repl;
mod speech;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use netsource_ai::tools::{builtin_registry, builtin_tools, load_catalogue};
use netsource_ai::{OpenAiClient, OpenAiConfig, Session, ToolExecutor};
use netsource_common::{ConfigError, NetsourceError};
use netsource_config::NetsourceConfig;

use crate::cli::Args;
use crate::repl::Repl;
use crate::speech::CommandSpeaker;

/// Load environment variables from a .env file (KEY=VALUE lines).
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

/// `--log-level` beats `RUST_LOG`, which beats the config file.
fn filter_directive(
    cli_level: Option<&str>,
    rust_log: Option<&str>,
    config_level: &str,
) -> String {
    match (cli_level, rust_log) {
        (Some(level), _) => log_directive(level),
        (None, Some(env)) if !env.trim().is_empty() => env.to_string(),
        _ => log_directive(config_level),
    }
}

fn subscriber<W>(directive: String, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(writer)
        .finish()
}

fn rust_log() -> Option<String> {
    std::env::var(EnvFilter::DEFAULT_ENV).ok()
}

/// Load config with a provisional subscriber so loader events are not lost
/// before the configured log level is known.
fn load_config_logged<W>(args: &Args, writer: W) -> Result<NetsourceConfig, ConfigError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = subscriber(
        filter_directive(args.log_level.as_deref(), rust_log().as_deref(), "info"),
        writer,
    );
    tracing::subscriber::with_default(bootstrap, || {
        netsource_config::load_config(args.config.as_deref())
    })
}

fn init_logging(args: &Args, config: &NetsourceConfig) {
    let directive = filter_directive(
        args.log_level.as_deref(),
        rust_log().as_deref(),
        config.logging.level.as_str(),
    );
    let subscriber = subscriber(directive, std::io::stderr);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("netsource: logging already initialized: {e}");
    }
}

/// A bare level applies to this workspace's crates only.
fn log_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("netsource={level}")
    }
}

async fn run(args: Args, config: NetsourceConfig) -> netsource_common::Result<()> {
    let definitions = match &config.tools.definitions_path {
        Some(path) => load_catalogue(path)?,
        None => builtin_tools(),
    };
    let registry = builtin_registry(&config.search, definitions)
        .map_err(|e| NetsourceError::Ai(e.to_string()))?;
    tracing::info!("Tools ready: {}", registry.names().join(", "));

    let client_config = OpenAiConfig::from_settings(&config.model);
    if client_config.api_key.is_none() {
        tracing::warn!("No API key configured; requests are sent without authorization");
    }
    let client =
        OpenAiClient::new(client_config).map_err(|e| NetsourceError::Ai(e.to_string()))?;

    let temperature = args.temperature.unwrap_or(config.model.default_temperature);
    let session = Session::new(&config.system_prompt, ToolExecutor::new(registry))
        .with_temperature(temperature)
        .with_parallel_tools(config.tools.parallel);

    let mut repl = Repl::new(
        session,
        Box::new(client),
        Box::new(CommandSpeaker::from_settings(&config.speech)),
        args.voice || config.ui.sound_enabled,
        &config.ui.app_title,
    );

    match args.ask {
        Some(question) => repl
            .ask(&question)
            .await
            .map_err(|e| NetsourceError::Ai(e.to_string())),
        None => repl.run().await,
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();

    let args = cli::parse();

    let config = match load_config_logged(&args, std::io::stderr) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("netsource: {e}");
            std::process::exit(2);
        }
    };

    init_logging(&args, &config);
    tracing::info!("NetSource v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.print_config {
        println!("{}", netsource_config::config_to_json(&config));
        return;
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        eprintln!("netsource: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
