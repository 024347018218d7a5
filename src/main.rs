use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{chat, check_booking, check_voice};
use cotton::providers::configs::base::{strip_quotes, ProviderConfig};
use cotton::providers::configs::gemini::{GeminiProviderConfig, GEMINI_HOST, GEMINI_MODEL};
use cotton::speech::recognition::DEFAULT_LISTEN_SECONDS;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Google API key (can also be set via GOOGLE_API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model to use (can also be set via MODEL_NAME environment variable)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Print replies without speaking them
    #[arg(long, global = true)]
    mute: bool,

    /// How long to record in voice input mode
    #[arg(long, global = true, default_value_t = DEFAULT_LISTEN_SECONDS)]
    listen_seconds: u32,

    /// Language for speech synthesis and recognition
    #[arg(long, global = true, default_value = "en")]
    lang: String,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Talk with Cotton (default)
    Chat,

    /// Check whether the model books an appointment for a message
    CheckBooking {
        /// Message to send
        #[arg(default_value = check_booking::DEFAULT_MESSAGE)]
        text: String,
    },

    /// Check speech output and microphone input
    CheckVoice,
}

/// Everything the voice adapters need
pub struct VoiceSettings {
    pub mute: bool,
    pub listen_seconds: u32,
    pub lang: String,
    pub speech_key: String,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = provider_config(&cli)?;
    let voice = VoiceSettings {
        mute: cli.mute,
        listen_seconds: cli.listen_seconds,
        lang: cli.lang.clone(),
        speech_key: env::var("GOOGLE_SPEECH_API_KEY")
            .map(|key| strip_quotes(&key).to_string())
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| config.api_key.clone()),
    };

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat::execute(config, &voice),
        Command::CheckBooking { text } => check_booking::execute(config, &text),
        Command::CheckVoice => check_voice::execute(&voice),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cotton={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the provider settings from the environment, letting flags win
fn provider_config(cli: &Cli) -> Result<GeminiProviderConfig> {
    let mut config = match cli.api_key.as_deref() {
        Some(api_key) => GeminiProviderConfig::new(
            strip_quotes(api_key).to_string(),
            env::var("GOOGLE_API_HOST").unwrap_or_else(|_| GEMINI_HOST.to_string()),
            env::var("MODEL_NAME").unwrap_or_else(|_| GEMINI_MODEL.to_string()),
        ),
        None => GeminiProviderConfig::from_env()?,
    };

    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    Ok(config)
}
