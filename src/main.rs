//! speak-enqueue CLI - hands text to the speak daemon and exits.
//!
//! This is the main binary entry point. See the `speak_enqueue` library
//! for the protocol.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mimalloc::MiMalloc;

use speak_enqueue::constants::{DEFAULT_SPEED, DEFAULT_VOICE, ENV_LOG_FILE};
use speak_enqueue::{
    input, ClientConfig, ControlCommand, EnqueueError, EnqueueRequest, SpeakClient,
};

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// CLI
#[derive(Parser, Debug)]
#[command(name = "speak-enqueue")]
#[command(version)]
#[command(about = "Queue text on the speak daemon", long_about = None)]
struct Cli {
    /// Voice to speak with
    #[arg(short = 'v', long, default_value = DEFAULT_VOICE)]
    voice: String,

    /// Speech speed, sent to the daemon as written
    #[arg(short = 's', long, default_value = DEFAULT_SPEED, allow_hyphen_values = true)]
    speed: String,

    /// Caller name, used by the daemon for history and tones
    #[arg(short = 'c', long)]
    caller: Option<String>,

    /// Language code (daemon default: en-us)
    #[arg(short = 'l', long)]
    lang: Option<String>,

    /// Give up on socket reads and writes after this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_arg)]
    timeout: Option<Duration>,

    /// Send a queue control command instead of text
    #[arg(long, value_enum, conflicts_with = "text")]
    command: Option<ControlCommand>,

    /// Text to speak; read from stdin when omitted
    text: Vec<String>,
}

fn parse_timeout_arg(raw: &str) -> Result<Duration, String> {
    speak_enqueue::env::parse_timeout(raw)
        .ok_or_else(|| format!("invalid timeout '{raw}': expected a positive number of seconds"))
}

/// Route `log` output to stderr, or to `SPEAK_LOG_FILE` when set.
fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_secs();

    if let Ok(path) = std::env::var(ENV_LOG_FILE) {
        let log_file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create log file at {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), EnqueueError> {
    let mut config = ClientConfig::load();
    if cli.timeout.is_some() {
        config = config.with_timeout(cli.timeout);
    }
    let client = SpeakClient::new(config);

    if let Some(command) = cli.command {
        if let Some(reply) = client.control(command)? {
            let pretty = serde_json::to_string_pretty(&reply).unwrap_or_else(|_| reply.to_string());
            println!("{pretty}");
        }
        return Ok(());
    }

    let text = input::acquire_text(&cli.text)?;
    let request = EnqueueRequest::new(text)
        .with_voice(cli.voice)
        .with_speed(cli.speed)
        .with_caller(cli.caller)
        .with_lang(cli.lang);

    let outcome = client.enqueue(&request)?;
    if let Some(position) = outcome.position() {
        eprintln!("queued (position {position})");
    }
    outcome.into_result()?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("speak-enqueue: {e:#}");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and go to stdout.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("invocation failed: {e:?}");
            eprintln!("speak-enqueue: {e}");
            ExitCode::FAILURE
        }
    }
}
