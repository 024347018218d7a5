use anyhow::Result;
use console::style;

use super::{build_listener, build_speaker};
use crate::VoiceSettings;
use cotton::prompt::cliclack::CliclackPrompt;
use cotton::speech::recognition::listen;

const GREETING: &str = "Hello, I'm Cotton, your therapy companion. Can you hear me clearly?";

pub fn execute(voice: &VoiceSettings) -> Result<()> {
    let mut speaker = build_speaker(voice)?;

    println!("{} {}", style("Speaking:").bold(), GREETING);
    if let Some(speaker) = speaker.as_mut() {
        speaker.speak(GREETING)?;
    }

    let listener = build_listener(voice)?;
    let mut prompt = CliclackPrompt::new();
    let heard = listen(listener.as_ref(), &mut prompt)?;

    match echo(&heard) {
        Some(response) => {
            println!("{} {}", style("Responding with:").green().bold(), response);
            if let Some(speaker) = speaker.as_mut() {
                speaker.speak(&response)?;
            }
        }
        None => println!(
            "{}",
            style("Nothing was recognized. Check your microphone and try again.").yellow()
        ),
    }
    Ok(())
}

/// What to say back after hearing `heard`
fn echo(heard: &str) -> Option<String> {
    if heard.trim().is_empty() {
        None
    } else {
        Some(format!("I heard you say: {}", heard))
    }
}
