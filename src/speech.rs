//! Voice I/O: replies are synthesized remotely and played through a
//! platform player; input is recorded locally and transcribed remotely.
pub mod playback;
pub mod recognition;
pub mod tts;

use anyhow::Result;
use std::io::Write;
use tempfile::TempPath;

use playback::AudioSink;
use tts::TextToSpeech;

/// Speaks replies aloud
pub struct Speaker {
    tts: Box<dyn TextToSpeech>,
    sink: Box<dyn AudioSink>,
    // Kept until the next reply: some players return before they finish reading.
    last_artifact: Option<TempPath>,
}

impl Speaker {
    pub fn new(tts: Box<dyn TextToSpeech>, sink: Box<dyn AudioSink>) -> Self {
        Self {
            tts,
            sink,
            last_artifact: None,
        }
    }

    pub fn speak(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let audio = self.tts.synthesize(text)?;
        if audio.is_empty() {
            return Ok(());
        }

        let mut file = tempfile::Builder::new()
            .prefix("cotton-")
            .suffix(".mp3")
            .tempfile()?;
        file.write_all(&audio)?;
        file.flush()?;
        let artifact = file.into_temp_path();

        tracing::debug!(player = self.sink.name(), path = %artifact.display(), "playing reply");
        self.sink.play(&artifact)?;
        self.last_artifact = Some(artifact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlaybackError;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    struct EchoTts;

    impl TextToSpeech for EchoTts {
        fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
            Ok(text.as_bytes().to_vec())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        played: Rc<RefCell<Vec<Vec<u8>>>>,
    }

    impl AudioSink for RecordingSink {
        fn play(&self, artifact: &Path) -> Result<(), PlaybackError> {
            assert_eq!(artifact.extension().and_then(|e| e.to_str()), Some("mp3"));
            let bytes = std::fs::read(artifact).expect("artifact should exist while playing");
            self.played.borrow_mut().push(bytes);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[test]
    fn test_speak_plays_synthesized_audio() -> Result<()> {
        let sink = RecordingSink::default();
        let mut speaker = Speaker::new(Box::new(EchoTts), Box::new(sink.clone()));

        speaker.speak("Hello there")?;
        speaker.speak("Take care")?;

        assert_eq!(
            *sink.played.borrow(),
            vec![b"Hello there".to_vec(), b"Take care".to_vec()]
        );
        Ok(())
    }

    #[test]
    fn test_previous_artifact_is_removed() -> Result<()> {
        let mut speaker = Speaker::new(Box::new(EchoTts), Box::new(RecordingSink::default()));

        speaker.speak("first")?;
        let first = speaker.last_artifact.as_ref().unwrap().to_path_buf();
        assert!(first.exists());

        speaker.speak("second")?;
        assert!(!first.exists());
        Ok(())
    }

    #[test]
    fn test_blank_text_is_not_spoken() -> Result<()> {
        let sink = RecordingSink::default();
        let mut speaker = Speaker::new(Box::new(EchoTts), Box::new(sink.clone()));
        speaker.speak("   ")?;
        assert!(sink.played.borrow().is_empty());
        Ok(())
    }
}
