//! Attachment Source port
//!
//! Turns user-supplied references (file paths or `data:` references) into an
//! [`ImageData`] ready to stage. Only the first reference is used when
//! several are given.

use async_trait::async_trait;
use mog_domain::ImageData;
use std::path::PathBuf;
use thiserror::Error;

/// Why an attachment could not be loaded. Nothing is staged in any case.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct AttachmentLoadError(pub String);

#[async_trait]
pub trait AttachmentSource: Send + Sync {
    async fn load(&self, references: &[PathBuf]) -> Result<ImageData, AttachmentLoadError>;
}
