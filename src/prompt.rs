use anyhow::Result;

use crate::models::message::Message;

pub mod cliclack;

/// The terminal side of a session: reads typed input and shows replies
pub trait Prompt {
    fn render(&mut self, message: &Message);
    fn get_input(&mut self) -> Result<String>;
    /// Status lines that are not part of the transcript
    fn notice(&mut self, text: &str);
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn ready(&mut self) {}
    fn close(&mut self) {}
}
