//! Console rendering of the message log

use colored::Colorize;
use mog_domain::{ImageData, Message, MessageContent, Mode, Role};
use std::path::Path;

/// Formats messages for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner printed when the REPL starts
    pub fn header(mode: Mode) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{:^60}\n{}\n{} {}",
            line.yellow(),
            "MOG SANCTUM".bold(),
            line.yellow(),
            "Mode:".cyan().bold(),
            Self::mode_badge(mode)
        )
    }

    pub fn mode_badge(mode: Mode) -> String {
        match mode {
            Mode::Chat => "CHAT".green().bold().to_string(),
            Mode::ImageGeneration => "VISUALS".magenta().bold().to_string(),
        }
    }

    /// Format one message; `saved` is where an image was written, if anywhere.
    pub fn format_message(message: &Message, saved: Option<&Path>) -> String {
        let body = match message.content() {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Image(image) => {
                let label = Self::image_label(image);
                match saved {
                    Some(path) => format!("{} -> {}", label, path.display()),
                    None => label,
                }
            }
        };

        match message.role() {
            Role::User => format!("{:>60}", format!("{} {}", body, "<you".blue().bold())),
            Role::Agent => format!("{} {}", "mog>".yellow().bold(), body),
        }
    }

    /// Placeholder for image content in a text terminal
    pub fn image_label(image: &ImageData) -> String {
        format!("[image {}, {} bytes]", image.media_type(), image.len())
            .dimmed()
            .to_string()
    }

    /// Format the whole log, oldest first
    pub fn format_transcript(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| Self::format_message(m, None))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn attachment_staged(image: &ImageData) -> String {
        format!(
            "{} {} (mode: {})",
            "Staged".green().bold(),
            Self::image_label(image),
            Self::mode_badge(Mode::ImageGeneration)
        )
    }
}
