//! Writes agent-produced images to disk

use mog_domain::{Message, MessageContent};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Saves image messages as `mog-<id>.<ext>` under a directory.
pub struct ImageWriter {
    dir: PathBuf,
}

impl ImageWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the message's image, if it has one. Text messages are skipped.
    pub fn save(&self, message: &Message) -> io::Result<Option<PathBuf>> {
        let MessageContent::Image(image) = message.content() else {
            return Ok(None);
        };

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!(
            "mog-{}.{}",
            message.id(),
            extension_for(image.media_type())
        ));
        std::fs::write(&path, image.bytes())?;
        debug!(path = %path.display(), bytes = image.len(), "Image written");
        Ok(Some(path))
    }
}

fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",
        "image/heif" => "heif",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_domain::{ImageData, Mode, Session};

    #[test]
    fn test_saves_images_and_skips_text() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ImageWriter::new(dir.path().join("mogs"));

        let mut session = Session::with_mode(Mode::ImageGeneration);
        session.append_user_message("mog", None).unwrap();
        session.start_exchange().unwrap();
        let appended = session
            .complete_exchange(vec![
                MessageContent::Image(ImageData::new("image/jpeg", vec![1, 2]).unwrap()),
                MessageContent::Text("Mogged.".to_string()),
            ])
            .unwrap()
            .to_vec();

        let path = writer.save(&appended[0]).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "mog-2.jpg");
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2]);
        assert!(writer.save(&appended[1]).unwrap().is_none());
    }

    #[test]
    fn test_unknown_media_type_gets_bin() {
        assert_eq!(extension_for("image/avif"), "bin");
    }
}
