//! The mock appointment-booking capability.
//!
//! There is no scheduling backend: booking always succeeds and the
//! confirmation is regenerated from the arguments on every call.
use serde_json::json;

use crate::tool::Tool;

pub const BOOK_APPOINTMENT: &str = "book_appointment";
pub const THERAPIST_NAME: &str = "therapist_name";
pub const TIME_SLOT: &str = "time_slot";

/// Declaration sent to the model alongside the first prompt of a turn
pub fn book_appointment_tool() -> Tool {
    Tool::new(
        BOOK_APPOINTMENT,
        "Book a therapy appointment",
        json!({
            "type": "object",
            "properties": {
                THERAPIST_NAME: {
                    "type": "string",
                    "description": "Name of the therapist"
                },
                TIME_SLOT: {
                    "type": "string",
                    "description": "Time slot for the appointment"
                }
            },
            "required": [THERAPIST_NAME, TIME_SLOT]
        }),
    )
}

pub fn book_appointment(therapist_name: &str, time_slot: &str) -> String {
    tracing::info!("Booking appointment with {} at {}", therapist_name, time_slot);
    format!(
        "Successfully booked an appointment with {} at {}. You'll receive a confirmation email shortly.",
        therapist_name, time_slot
    )
}
