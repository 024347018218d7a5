use anyhow::Result;
use console::style;

use super::{build_listener, build_speaker};
use crate::VoiceSettings;
use cotton::agent::Companion;
use cotton::prompt::cliclack::CliclackPrompt;
use cotton::providers::configs::gemini::GeminiProviderConfig;
use cotton::providers::gemini::GeminiProvider;
use cotton::session::Session;

pub fn execute(config: GeminiProviderConfig, voice: &VoiceSettings) -> Result<()> {
    let provider = GeminiProvider::new(config)?;
    println!("{}", style(format!("Using model: {}", provider.model())).dim());

    let mut session = Session::new(Companion::new(provider), CliclackPrompt::new())
        .with_listener(build_listener(voice)?);
    if let Some(speaker) = build_speaker(voice)? {
        session = session.with_speaker(speaker);
    }

    session.start()
}
