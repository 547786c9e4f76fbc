//! Image attachment ingestion from the filesystem.
//!
//! When several references are offered only the first is used. A reference
//! starting with `data:` is decoded in place and keeps the media type it
//! declares. Anything else is a file path: its media type comes from the
//! extension, and a file that is not a known image type is rejected before
//! it can be staged.

use async_trait::async_trait;
use mog_application::{AttachmentLoadError, AttachmentSource};
use mog_domain::{DomainError, ImageData};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("No file given")]
    NoFile,

    #[error("Unsupported file type: {0} (expected png, jpg, gif, webp or heic)")]
    UnsupportedType(PathBuf),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data reference: {0}")]
    DataReference(#[source] DomainError),

    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// Media type for a path, judged by extension (case-insensitive).
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

fn as_data_reference(path: &Path) -> Option<&str> {
    path.to_str().filter(|s| s.starts_with("data:"))
}

/// Turn the first of `paths` into an [`ImageData`].
pub async fn load_attachment<P: AsRef<Path>>(paths: &[P]) -> Result<ImageData, AttachmentError> {
    let path = paths.first().ok_or(AttachmentError::NoFile)?.as_ref();
    if paths.len() > 1 {
        debug!(
            ignored = paths.len() - 1,
            "Only the first attachment is used"
        );
    }

    if let Some(reference) = as_data_reference(path) {
        let image = ImageData::from_data_url(reference).map_err(AttachmentError::DataReference)?;
        debug!(media_type = image.media_type(), bytes = image.len(), "Decoded data reference");
        return Ok(image);
    }

    let media_type =
        media_type_for(path).ok_or_else(|| AttachmentError::UnsupportedType(path.to_path_buf()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    ImageData::new(media_type, bytes).map_err(|source| AttachmentError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// [`AttachmentSource`] reading from the local filesystem.
pub struct FsAttachmentSource;

#[async_trait]
impl AttachmentSource for FsAttachmentSource {
    async fn load(&self, references: &[PathBuf]) -> Result<ImageData, AttachmentLoadError> {
        load_attachment(references)
            .await
            .map_err(|e| AttachmentLoadError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_application::{AdapterError, AgentController, ClientAdapter, ExchangeParams};
    use mog_domain::{ContentPart, Mode, Turn};
    use std::sync::{Arc, Mutex};

    /// Records generation parts and echoes a short text reply.
    #[derive(Default)]
    struct RecordingAdapter {
        parts: Mutex<Vec<ContentPart>>,
    }

    #[async_trait]
    impl ClientAdapter for RecordingAdapter {
        async fn conversational_exchange(
            &self,
            _persona: &str,
            _history: &[Turn],
            _message: &str,
        ) -> Result<Option<String>, AdapterError> {
            Ok(None)
        }

        async fn multimodal_generate(
            &self,
            parts: &[ContentPart],
        ) -> Result<Vec<ContentPart>, AdapterError> {
            *self.parts.lock().unwrap() = parts.to_vec();
            Ok(vec![ContentPart::text("Mogged.")])
        }
    }

    #[test]
    fn test_media_type_by_extension() {
        assert_eq!(media_type_for(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(media_type_for(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("dir/a.webp")), Some("image/webp"));
        assert_eq!(media_type_for(Path::new("a.heif")), Some("image/heif"));
        assert_eq!(media_type_for(Path::new("a.pdf")), None);
        assert_eq!(media_type_for(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn test_first_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("chart.gif");
        let second = dir.path().join("other.png");
        std::fs::write(&first, [7u8, 7, 7]).unwrap();
        std::fs::write(&second, [1u8]).unwrap();

        let image = load_attachment(&[first, second]).await.unwrap();
        assert_eq!(image.media_type(), "image/gif");
        assert_eq!(image.bytes(), &[7, 7, 7]);
    }

    #[tokio::test]
    async fn test_rejects_non_image_before_reading() {
        let err = load_attachment(&["does-not-exist.txt"]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png");
        assert!(matches!(
            load_attachment(&[&missing]).await.unwrap_err(),
            AttachmentError::Io { .. }
        ));

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(
            load_attachment(&[&empty]).await.unwrap_err(),
            AttachmentError::Invalid { .. }
        ));

        let none: [&Path; 0] = [];
        assert!(matches!(
            load_attachment(&none).await.unwrap_err(),
            AttachmentError::NoFile
        ));
    }

    #[tokio::test]
    async fn test_data_reference_keeps_declared_media_type() {
        // "R0lG" is the base64 of "GIF"
        let image = load_attachment(&["data:image/gif;base64,R0lG", "other.png"])
            .await
            .unwrap();
        assert_eq!(image.media_type(), "image/gif");
        assert_eq!(image.bytes(), b"GIF");
    }

    #[tokio::test]
    async fn test_staged_data_reference_reaches_the_inline_part() {
        let adapter = Arc::new(RecordingAdapter::default());
        let controller = AgentController::new(Some(adapter.clone()), ExchangeParams::default());

        let image = FsAttachmentSource
            .load(&[PathBuf::from("data:image/webp;base64,AQID")])
            .await
            .unwrap();
        controller.attach_image(image).unwrap();
        assert_eq!(controller.mode(), Mode::ImageGeneration);
        controller.submit("").await;

        let parts = adapter.parts.lock().unwrap().clone();
        assert_eq!(parts.len(), 2);
        let inline = parts[1].as_image().unwrap();
        assert_eq!(inline.media_type(), "image/webp");
        assert_eq!(inline.bytes(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_malformed_data_references_are_rejected() {
        for reference in [
            "data:image/png,not-base64",
            "data:image/png;base64,@@@",
            "data:image/png;base64,",
        ] {
            let err = load_attachment(&[reference]).await.unwrap_err();
            assert!(
                matches!(err, AttachmentError::DataReference(_)),
                "{reference}: {err}"
            );
        }
    }

    #[tokio::test]
    async fn test_fs_source_reports_readable_error() {
        let err = FsAttachmentSource
            .load(&[PathBuf::from("notes.md")])
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Unsupported file type: notes.md"));
    }
}
