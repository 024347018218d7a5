use std::io::{self, Write};

use anyhow::Result;
use cliclack::{input, spinner, ProgressBar};
use console::style;

use super::Prompt;
use crate::models::message::{Message, Role};

pub struct CliclackPrompt {
    spinner: Option<ProgressBar>,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt { spinner: None }
    }
}

impl Default for CliclackPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: &Message) {
        // Typed input is already echoed by cliclack.
        if message.role() == Role::Assistant {
            println!("{} {}", style("Cotton:").green().bold(), message.content());
            println!();
        }
        let _ = io::stdout().flush();
    }

    fn get_input(&mut self) -> Result<String> {
        match input("You:").placeholder("Type your message here...").interact::<String>() {
            Ok(text) => Ok(text),
            // Ctrl+C
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok("exit".to_string()),
            Err(e) => Err(e.into()),
        }
    }

    fn notice(&mut self, text: &str) {
        println!("{}", style(text).dim());
    }

    fn show_busy(&mut self) {
        let spin = spinner();
        spin.start("Cotton is thinking...");
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("");
        }
    }

    fn ready(&mut self) {
        let _ = cliclack::intro(style(" Cotton Therapy ").on_green().black());
        println!(
            "Your AI therapy companion {}",
            style("- type \"exit\" to quit or \"voice\" to switch to voice input").dim()
        );
        println!(
            "{}",
            style("Cotton is not a replacement for professional mental health services.").dim()
        );
        println!();
    }
}
