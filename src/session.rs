use anyhow::Result;
use std::thread;
use std::time::Duration;

use crate::agent::Companion;
use crate::models::message::Message;
use crate::prompt::Prompt;
use crate::providers::base::Provider;
use crate::speech::recognition::{listen, SpeechRecognizer};
use crate::speech::Speaker;

pub const WELCOME_MESSAGE: &str = "Hey, I'm Cotton, your therapy companion. Feel free to spill your thoughts, and I'm here to listen and support you.";
pub const FAREWELL_MESSAGE: &str = "Take care! Remember I'm here whenever you need to talk.";
pub const VOICE_MODE_MESSAGE: &str =
    "Switching to voice input mode. Speak clearly into your microphone.";
pub const TEXT_MODE_MESSAGE: &str = "Switching to text input mode.";
pub const VOICE_UNAVAILABLE_MESSAGE: &str =
    "Voice input is not available in this session, staying in text mode.";

pub const DEFAULT_TURN_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Voice,
}

/// What a line of user input means for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Switch(InputMode),
    AskAgain,
    Exit,
}

/// Interpret raw input. Control words are matched trimmed and
/// case-insensitively, and only switch to the mode that is not current.
/// Anything else is passed on exactly as typed.
pub fn interpret(raw: &str, mode: InputMode) -> Input {
    match (mode, raw.trim().to_lowercase().as_str()) {
        (_, "exit") => Input::Exit,
        (InputMode::Text, "voice") => Input::Switch(InputMode::Voice),
        (InputMode::Voice, "text") => Input::Switch(InputMode::Text),
        (_, "") => Input::AskAgain,
        _ => Input::Message(raw.to_string()),
    }
}

/// The visible conversation, in order. Messages are only ever appended.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub struct Session<P: Provider, R: Prompt> {
    companion: Companion<P>,
    prompt: R,
    speaker: Option<Speaker>,
    listener: Option<Box<dyn SpeechRecognizer>>,
    transcript: Transcript,
    mode: InputMode,
    pause: Duration,
}

impl<P: Provider, R: Prompt> Session<P, R> {
    pub fn new(companion: Companion<P>, prompt: R) -> Self {
        Session {
            companion,
            prompt,
            speaker: None,
            listener: None,
            transcript: Transcript::new(),
            mode: InputMode::Text,
            pause: DEFAULT_TURN_PAUSE,
        }
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn with_listener(mut self, listener: Box<dyn SpeechRecognizer>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn prompt(&self) -> &R {
        &self.prompt
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Run turns until the user exits. A failed model call ends the session.
    pub fn start(&mut self) -> Result<()> {
        self.prompt.ready();
        self.reply(WELCOME_MESSAGE, true);

        loop {
            let raw = self.read_input()?;
            match interpret(&raw, self.mode) {
                Input::Exit => {
                    self.reply(FAREWELL_MESSAGE, false);
                    break;
                }
                Input::AskAgain => continue,
                Input::Switch(InputMode::Voice) if self.listener.is_none() => {
                    self.prompt.notice(VOICE_UNAVAILABLE_MESSAGE);
                }
                Input::Switch(mode) => {
                    self.mode = mode;
                    let announcement = match mode {
                        InputMode::Voice => VOICE_MODE_MESSAGE,
                        InputMode::Text => TEXT_MODE_MESSAGE,
                    };
                    self.reply(announcement, false);
                }
                Input::Message(text) => {
                    self.turn(&text)?;
                    if !self.pause.is_zero() {
                        thread::sleep(self.pause);
                    }
                }
            }
        }

        self.prompt.close();
        Ok(())
    }

    fn read_input(&mut self) -> Result<String> {
        match (self.mode, self.listener.as_deref()) {
            (InputMode::Voice, Some(listener)) => listen(listener, &mut self.prompt),
            _ => self.prompt.get_input(),
        }
    }

    fn turn(&mut self, text: &str) -> Result<()> {
        let user = self.transcript.push(Message::user(text));
        self.prompt.render(user);

        self.prompt.show_busy();
        let reply = self.companion.respond(text);
        self.prompt.hide_busy();

        self.reply(&reply?, true);
        Ok(())
    }

    fn reply(&mut self, text: &str, spoken: bool) {
        let message = self.transcript.push(Message::assistant(text));
        self.prompt.render(message);

        if !spoken {
            return;
        }
        if let Some(speaker) = self.speaker.as_mut() {
            if let Err(e) = speaker.speak(text) {
                tracing::warn!(error = %e, "voice output failed");
                self.prompt.notice(&format!("Voice output failed: {}", e));
            }
        }
    }
}
