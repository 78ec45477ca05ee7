mod attach_photo;
mod create_user;
mod list_users;
mod upload_photo;

pub use attach_photo::AttachPhotoToUser;
pub use create_user::CreateUser;
pub use list_users::ListUsers;
pub use upload_photo::UploadPhoto;

use crate::domain::HostedMedia;
use crate::infrastructure::uploader::MediaUploader;

/// Best-effort removal of media whose URL never made it into the store.
async fn discard_upload(uploader: &dyn MediaUploader, media: &HostedMedia) {
    match uploader.destroy(&media.public_id).await {
        Ok(()) => tracing::info!(public_id = %media.public_id, "Discarded orphaned upload"),
        Err(e) => tracing::warn!(
            public_id = %media.public_id,
            url = %media.url,
            "Orphaned upload left on media host: {}",
            e
        ),
    }
}
