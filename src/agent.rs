use anyhow::Result;
use indoc::formatdoc;
use tracing::{debug, info, info_span};

use crate::booking::book_appointment_tool;
use crate::models::object_id;
use crate::providers::base::{GenerationConfig, Provider};
use crate::resolver::resolve;
use crate::tool::Tool;

/// Build the persona prompt around the user's words, verbatim
pub fn persona_prompt(user_text: &str) -> String {
    formatdoc!(
        "
        You're an empathetic therapist named Cotton. Respond supportively to: '{}'.
        Be warm, understanding, and compassionate. Use a conversational tone and keep responses concise.
        If the user expresses interest in booking a session with a human therapist, offer to help them book an appointment.",
        user_text
    )
}

/// The prompt for the second call of a turn, carrying the tool result
pub fn follow_up_prompt(prompt: &str, tool_result: &str) -> String {
    format!("{}\n\nThe appointment has been booked: {}", prompt, tool_result)
}

fn booking_probe_prompt(user_text: &str) -> String {
    format!(
        "You're an empathetic therapist. Respond to: '{}'. If the user wants to book a session, use the book_appointment function.",
        user_text
    )
}

/// Outcome of [`Companion::probe_booking`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingProbe {
    /// The model called the booking tool; holds the confirmation
    Booked(String),
    /// The model answered in text instead; holds its reply
    NotBooked(String),
}

/// Companion pairs the model with the persona and the booking tool
pub struct Companion<P: Provider> {
    provider: P,
    tools: Vec<Tool>,
    generation: GenerationConfig,
}

impl<P: Provider> Companion<P> {
    pub fn new(provider: P) -> Self {
        Self::with_generation(provider, GenerationConfig::default())
    }

    pub fn with_generation(provider: P, generation: GenerationConfig) -> Self {
        Self {
            provider,
            tools: vec![book_appointment_tool()],
            generation,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one turn: reply to `user_text`, booking an appointment on the
    /// way if the model asks for it. Provider failures end the turn.
    pub fn respond(&self, user_text: &str) -> Result<String> {
        let span = info_span!("turn", id = %object_id("turn"));
        let _guard = span.enter();

        let prompt = persona_prompt(user_text);
        let (response, usage) =
            self.provider
                .complete(&prompt, &self.tools, Some(&self.generation))?;
        debug!(?usage, "received first reply");

        match resolve(&response) {
            Some(result) if !result.is_empty() => {
                info!("tool call resolved, requesting follow-up reply");
                let (follow_up, usage) =
                    self.provider
                        .complete(&follow_up_prompt(&prompt, &result), &[], None)?;
                debug!(?usage, "received follow-up reply");
                Ok(follow_up.text()?)
            }
            _ => Ok(response.text()?),
        }
    }

    /// Ask the model directly whether it would book for `user_text`,
    /// without a follow-up reply
    pub fn probe_booking(&self, user_text: &str) -> Result<BookingProbe> {
        let prompt = booking_probe_prompt(user_text);
        let (response, usage) =
            self.provider
                .complete(&prompt, &self.tools, Some(&self.generation))?;
        debug!(?usage, "received booking probe reply");

        match resolve(&response) {
            Some(confirmation) => Ok(BookingProbe::Booked(confirmation)),
            None => Ok(BookingProbe::NotBooked(response.text()?)),
        }
    }
}
