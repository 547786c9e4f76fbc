//! Prints newly appended agent messages

use crate::config::OutputConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::image_writer::ImageWriter;
use mog_domain::{Message, Role};
use tracing::warn;

/// Renders agent replies, saving images when an output directory is set
pub struct ReplyPrinter {
    images: Option<ImageWriter>,
}

impl ReplyPrinter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            images: config.image_dir.as_ref().map(ImageWriter::new),
        }
    }

    /// Lines for the agent messages in `messages`; user messages are skipped.
    pub fn render(&self, messages: &[Message]) -> Vec<String> {
        messages
            .iter()
            .filter(|m| m.role() == Role::Agent)
            .map(|m| {
                let saved = self.images.as_ref().and_then(|w| match w.save(m) {
                    Ok(path) => path,
                    Err(e) => {
                        warn!(dir = %w.dir().display(), error = %e, "Could not write image");
                        None
                    }
                });
                ConsoleFormatter::format_message(m, saved.as_deref())
            })
            .collect()
    }

    pub fn print(&self, messages: &[Message]) {
        for line in self.render(messages) {
            println!("{}", line);
        }
    }
}
