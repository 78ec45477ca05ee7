use super::discard_upload;
use crate::domain::{Photo, UploadedFile};
use crate::infrastructure::db::{map_db_err, PhotoRepository};
use crate::infrastructure::uploader::MediaUploader;
use crate::infrastructure::validation::InputValidator;
use gallery_errors::AppError;
use std::sync::Arc;

pub struct UploadPhoto {
    photos: PhotoRepository,
    uploader: Arc<dyn MediaUploader>,
}

impl UploadPhoto {
    pub fn new(photos: PhotoRepository, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { photos, uploader }
    }

    pub async fn execute(&self, file: UploadedFile) -> Result<Photo, AppError> {
        let media = self.uploader.upload(file).await?;

        let url = match InputValidator::validate_hosted_url(&media.url) {
            Ok(url) => url,
            Err(e) => {
                discard_upload(self.uploader.as_ref(), &media).await;
                return Err(e);
            }
        };

        match self.photos.create(&url).await {
            Ok(photo) => {
                tracing::info!(photo_id = %photo.id, "Stored photo");
                Ok(photo.into())
            }
            Err(e) => {
                discard_upload(self.uploader.as_ref(), &media).await;
                Err(map_db_err(e))
            }
        }
    }
}
