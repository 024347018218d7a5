use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::errors::RecognitionError;
use crate::prompt::Prompt;

pub const SPEECH_HOST: &str = "http://www.google.com";
pub const SAMPLE_RATE: u32 = 16_000;
pub const DEFAULT_LISTEN_SECONDS: u32 = 5;

/// Turns the user's voice into text
pub trait SpeechRecognizer {
    fn recognize(&self) -> Result<String, RecognitionError>;
}

/// Raw 16-bit little-endian mono PCM at [`SAMPLE_RATE`]
pub trait AudioSource {
    fn record(&self) -> Result<Vec<u8>, RecognitionError>;
}

/// Records from the default microphone through an external program
#[derive(Debug, Clone)]
pub struct Recorder {
    program: &'static str,
    args: Vec<String>,
}

impl Recorder {
    /// `arecord` on Linux, sox's `rec` elsewhere
    pub fn for_os(os: &str, seconds: u32) -> Self {
        let seconds = seconds.to_string();
        let rate = SAMPLE_RATE.to_string();
        match os {
            "linux" => Self {
                program: "arecord",
                args: vec![
                    "-q".into(),
                    "-f".into(),
                    "S16_LE".into(),
                    "-r".into(),
                    rate,
                    "-c".into(),
                    "1".into(),
                    "-t".into(),
                    "raw".into(),
                    "-d".into(),
                    seconds,
                ],
            },
            _ => Self {
                program: "rec",
                args: vec![
                    "-q".into(),
                    "-t".into(),
                    "raw".into(),
                    "-r".into(),
                    rate,
                    "-b".into(),
                    "16".into(),
                    "-c".into(),
                    "1".into(),
                    "-e".into(),
                    "signed-integer".into(),
                    "-".into(),
                    "trim".into(),
                    "0".into(),
                    seconds,
                ],
            },
        }
    }

    pub fn program(&self) -> &str {
        self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl AudioSource for Recorder {
    fn record(&self) -> Result<Vec<u8>, RecognitionError> {
        let output = Command::new(self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RecognitionError::Capture(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(RecognitionError::Capture(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }
}

/// Google's web speech endpoint
pub struct GoogleSpeechRecognizer {
    client: Client,
    source: Box<dyn AudioSource>,
    host: String,
    api_key: String,
    lang: String,
}

impl GoogleSpeechRecognizer {
    pub fn new(source: Box<dyn AudioSource>, api_key: &str, lang: &str) -> Result<Self> {
        Self::with_host(source, SPEECH_HOST, api_key, lang)
    }

    pub fn with_host(
        source: Box<dyn AudioSource>,
        host: &str,
        api_key: &str,
        lang: &str,
    ) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            source,
            host: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            lang: lang.to_string(),
        })
    }

    fn request(&self, audio: Vec<u8>) -> Result<String, RecognitionError> {
        let url = format!("{}/speech-api/v2/recognize", self.host);
        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "chromium"),
                ("lang", self.lang.as_str()),
                ("key", self.api_key.as_str()),
                ("pFilter", "0"),
            ])
            .header(CONTENT_TYPE, format!("audio/l16; rate={}", SAMPLE_RATE))
            .body(audio)
            .send()
            .map_err(|e| RecognitionError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecognitionError::Unavailable(format!("status {}", status)));
        }
        response
            .text()
            .map_err(|e| RecognitionError::Unavailable(e.to_string()))
    }
}

impl SpeechRecognizer for GoogleSpeechRecognizer {
    fn recognize(&self) -> Result<String, RecognitionError> {
        let audio = self.source.record()?;
        if audio.is_empty() {
            return Err(RecognitionError::Unintelligible);
        }
        let body = self.request(audio)?;
        parse_transcript(&body).ok_or(RecognitionError::Unintelligible)
    }
}

/// Pull the first transcript out of the endpoint's newline-delimited JSON
/// reply. The first line is usually an empty `{"result":[]}`.
pub fn parse_transcript(body: &str) -> Option<String> {
    body.lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .flat_map(|value| match value.get("result") {
            Some(Value::Array(results)) => results.clone(),
            _ => Vec::new(),
        })
        .flat_map(|result| match result.get("alternative") {
            Some(Value::Array(alternatives)) => alternatives.clone(),
            _ => Vec::new(),
        })
        .filter_map(|alternative| {
            alternative
                .get("transcript")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
        .next()
}

/// Listen for one utterance. Unintelligible speech and an unreachable
/// service both come back as empty text after telling the user; a
/// microphone failure is an error.
pub fn listen(recognizer: &dyn SpeechRecognizer, prompt: &mut dyn Prompt) -> Result<String> {
    prompt.notice("Listening...");
    match recognizer.recognize() {
        Ok(text) => {
            prompt.notice(&format!("You said: {}", text));
            Ok(text)
        }
        Err(RecognitionError::Unintelligible) => {
            prompt.notice("Sorry, I couldn't understand what you said.");
            Ok(String::new())
        }
        Err(RecognitionError::Unavailable(reason)) => {
            tracing::warn!(%reason, "speech recognition request failed");
            prompt.notice("Could not request results from speech recognition service.");
            Ok(String::new())
        }
        Err(err @ RecognitionError::Capture(_)) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompt;
    use mockito::{Matcher, Server};

    struct FixedAudio(Vec<u8>);

    impl AudioSource for FixedAudio {
        fn record(&self) -> Result<Vec<u8>, RecognitionError> {
            Ok(self.0.clone())
        }
    }

    struct FixedOutcome(fn() -> Result<String, RecognitionError>);

    impl SpeechRecognizer for FixedOutcome {
        fn recognize(&self) -> Result<String, RecognitionError> {
            (self.0)()
        }
    }

    const RECOGNIZED: &str = "{\"result\":[]}\n{\"result\":[{\"alternative\":[{\"transcript\":\"I feel anxious today\",\"confidence\":0.92},{\"transcript\":\"I feel anxious to day\"}],\"final\":true}],\"result_index\":0}\n";

    #[test]
    fn test_parse_transcript() {
        assert_eq!(
            parse_transcript(RECOGNIZED).as_deref(),
            Some("I feel anxious today")
        );
        assert_eq!(parse_transcript("{\"result\":[]}\n"), None);
        assert_eq!(parse_transcript(""), None);
        assert_eq!(parse_transcript("not json"), None);
    }

    #[test]
    fn test_recorder_commands() {
        let recorder = Recorder::for_os("linux", 5);
        assert_eq!(recorder.program(), "arecord");
        assert!(recorder.args().ends_with(&["-d".to_string(), "5".to_string()]));

        let recorder = Recorder::for_os("macos", 7);
        assert_eq!(recorder.program(), "rec");
        assert!(recorder.args().contains(&"signed-integer".to_string()));
        assert_eq!(recorder.args().last().map(String::as_str), Some("7"));
    }

    #[test]
    fn test_recognize_posts_audio() -> Result<()> {
        let mut server = Server::new();
        let mock = server
            .mock("POST", Matcher::Regex(r"^/speech-api/v2/recognize".to_string()))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "speech-key".into()),
                Matcher::UrlEncoded("lang".into(), "en-US".into()),
            ]))
            .match_header("content-type", "audio/l16; rate=16000")
            .with_status(200)
            .with_body(RECOGNIZED)
            .create();

        let recognizer = GoogleSpeechRecognizer::with_host(
            Box::new(FixedAudio(vec![1, 2, 3, 4])),
            &server.url(),
            "speech-key",
            "en-US",
        )?;

        assert_eq!(recognizer.recognize()?, "I feel anxious today");
        mock.assert();
        Ok(())
    }

    #[test]
    fn test_empty_result_is_unintelligible() -> Result<()> {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/speech-api/v2/recognize".to_string()))
            .with_status(200)
            .with_body("{\"result\":[]}\n")
            .create();

        let recognizer = GoogleSpeechRecognizer::with_host(
            Box::new(FixedAudio(vec![0; 32])),
            &server.url(),
            "speech-key",
            "en-US",
        )?;
        assert!(matches!(
            recognizer.recognize(),
            Err(RecognitionError::Unintelligible)
        ));
        Ok(())
    }

    #[test]
    fn test_silence_skips_the_request() -> Result<()> {
        let mut server = Server::new();
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create();

        let recognizer = GoogleSpeechRecognizer::with_host(
            Box::new(FixedAudio(Vec::new())),
            &server.url(),
            "speech-key",
            "en-US",
        )?;
        assert!(matches!(
            recognizer.recognize(),
            Err(RecognitionError::Unintelligible)
        ));
        mock.assert();
        Ok(())
    }

    #[test]
    fn test_service_errors_are_unavailable() -> Result<()> {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", Matcher::Regex(r"^/speech-api/v2/recognize".to_string()))
            .with_status(500)
            .create();

        let recognizer = GoogleSpeechRecognizer::with_host(
            Box::new(FixedAudio(vec![0; 32])),
            &server.url(),
            "speech-key",
            "en-US",
        )?;
        assert!(matches!(
            recognizer.recognize(),
            Err(RecognitionError::Unavailable(_))
        ));
        Ok(())
    }

    #[test]
    fn test_listen_maps_soft_failures_to_empty_text() -> Result<()> {
        let mut prompt = ScriptedPrompt::new(Vec::<&str>::new());

        let heard = listen(&FixedOutcome(|| Ok("hello".to_string())), &mut prompt)?;
        assert_eq!(heard, "hello");

        let heard = listen(&FixedOutcome(|| Err(RecognitionError::Unintelligible)), &mut prompt)?;
        assert_eq!(heard, "");

        let heard = listen(
            &FixedOutcome(|| Err(RecognitionError::Unavailable("offline".to_string()))),
            &mut prompt,
        )?;
        assert_eq!(heard, "");

        assert_eq!(
            prompt.notices(),
            vec![
                "Listening...",
                "You said: hello",
                "Listening...",
                "Sorry, I couldn't understand what you said.",
                "Listening...",
                "Could not request results from speech recognition service.",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_listen_propagates_capture_failures() {
        let mut prompt = ScriptedPrompt::new(Vec::<&str>::new());
        let result = listen(
            &FixedOutcome(|| Err(RecognitionError::Capture("no microphone".to_string()))),
            &mut prompt,
        );
        assert!(result.is_err());
    }
}
