use crate::domain::{HostedMedia, UploadedFile};
use async_trait::async_trait;
use gallery_errors::AppError;

/// A remote host that stores uploaded images and hands back a public URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<HostedMedia, AppError>;

    /// Removes previously uploaded media. Used to undo an upload whose URL
    /// could not be persisted.
    async fn destroy(&self, public_id: &str) -> Result<(), AppError>;
}
