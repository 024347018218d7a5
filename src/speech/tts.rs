use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;

pub const TRANSLATE_HOST: &str = "https://translate.google.com";

// The translate endpoint rejects longer inputs.
const MAX_CHUNK_CHARS: usize = 100;

const BREAK_CHARS: &[char] = &['.', '!', '?', ';', ':', '\n', '…'];

/// Turns text into playable MP3 bytes
pub trait TextToSpeech {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Google Translate's text-to-speech endpoint
pub struct GoogleTranslateTts {
    client: Client,
    host: String,
    lang: String,
}

impl GoogleTranslateTts {
    pub fn new(lang: &str) -> Result<Self> {
        Self::with_host(TRANSLATE_HOST, lang)
    }

    pub fn with_host(host: &str, lang: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            lang: lang.to_string(),
        })
    }
}

impl TextToSpeech for GoogleTranslateTts {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        let total = chunks.len().to_string();
        let url = format!("{}/translate_tts", self.host);
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let query = [
                ("ie", "UTF-8".to_string()),
                ("client", "tw-ob".to_string()),
                ("tl", self.lang.clone()),
                ("q", chunk.clone()),
                ("total", total.clone()),
                ("idx", idx.to_string()),
                ("textlen", chunk.chars().count().to_string()),
            ];
            let response = self
                .client
                .get(&url)
                .header(USER_AGENT, "Mozilla/5.0")
                .query(&query)
                .send()?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!(
                    "Text-to-speech request failed for chunk {} of {}: {}",
                    idx + 1,
                    total,
                    status
                ));
            }
            audio.extend_from_slice(&response.bytes()?);
        }

        tracing::debug!(chunks = chunks.len(), bytes = audio.len(), "synthesized speech");
        Ok(audio)
    }
}

/// Split text into pieces of at most `max_chars` characters, preferring
/// sentence punctuation, then whitespace, then arbitrary character
/// boundaries. Pieces without any letters or digits are dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split_inclusive(BREAK_CHARS) {
        let sentence = sentence.trim();
        if sentence.chars().count() <= max_chars {
            pack(&mut chunks, &mut current, sentence, max_chars);
            continue;
        }
        for word in sentence.split_whitespace() {
            if word.chars().count() <= max_chars {
                pack(&mut chunks, &mut current, word, max_chars);
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                pack(&mut chunks, &mut current, &piece.iter().collect::<String>(), max_chars);
            }
        }
    }
    flush(&mut chunks, &mut current);
    chunks
}

fn pack(chunks: &mut Vec<String>, current: &mut String, token: &str, max_chars: usize) {
    if token.is_empty() {
        return;
    }
    let joined = current.chars().count() + token.chars().count() + 1;
    if !current.is_empty() && joined > max_chars {
        flush(chunks, current);
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(token);
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = std::mem::take(current);
    if chunk.chars().any(char::is_alphanumeric) {
        chunks.push(chunk);
    }
}
