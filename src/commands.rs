pub mod chat;
pub mod check_booking;
pub mod check_voice;

use anyhow::Result;

use crate::VoiceSettings;
use cotton::speech::playback::default_sink;
use cotton::speech::recognition::{GoogleSpeechRecognizer, Recorder, SpeechRecognizer};
use cotton::speech::tts::GoogleTranslateTts;
use cotton::speech::Speaker;

/// The reply voice, or nothing when muted
fn build_speaker(voice: &VoiceSettings) -> Result<Option<Speaker>> {
    if voice.mute {
        return Ok(None);
    }
    let tts = GoogleTranslateTts::new(&voice.lang)?;
    Ok(Some(Speaker::new(Box::new(tts), default_sink())))
}

fn build_listener(voice: &VoiceSettings) -> Result<Box<dyn SpeechRecognizer>> {
    let recorder = Recorder::for_os(std::env::consts::OS, voice.listen_seconds);
    tracing::debug!(program = recorder.program(), "using recorder");
    let recognizer = GoogleSpeechRecognizer::new(
        Box::new(recorder),
        &voice.speech_key,
        &recognition_lang(&voice.lang),
    )?;
    Ok(Box::new(recognizer))
}

/// The recognizer wants a region-qualified tag; bare `en` means `en-US`
fn recognition_lang(lang: &str) -> String {
    match lang {
        "en" => "en-US".to_string(),
        other => other.to_string(),
    }
}
