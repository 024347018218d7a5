use anyhow::Result;
use console::style;

use cotton::agent::{BookingProbe, Companion};
use cotton::providers::configs::gemini::GeminiProviderConfig;
use cotton::providers::gemini::GeminiProvider;

pub const DEFAULT_MESSAGE: &str =
    "I'm feeling anxious and would like to book a session with a therapist.";

pub fn execute(config: GeminiProviderConfig, text: &str) -> Result<()> {
    let companion = Companion::new(GeminiProvider::new(config)?);
    println!("{} {}", style("Testing with:").bold(), text);

    match companion.probe_booking(text)? {
        BookingProbe::Booked(confirmation) => {
            println!("{} {}", style("Booking successful:").green().bold(), confirmation);
        }
        BookingProbe::NotBooked(reply) => {
            println!("{} {}", style("Bot response:").bold(), reply);
            println!(
                "{}",
                style("No booking was made. The model didn't trigger the booking function.")
                    .yellow()
            );
        }
    }
    Ok(())
}
