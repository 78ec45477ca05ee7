use super::discard_upload;
use crate::domain::{UploadedFile, User};
use crate::infrastructure::db::{map_db_err, UserRepository};
use crate::infrastructure::uploader::MediaUploader;
use crate::infrastructure::validation::InputValidator;
use gallery_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Uploads a file and points a user's `picture` at it.
///
/// The upload and the database write are not atomic. If the write fails the
/// upload is destroyed again on a best-effort basis. Concurrent calls for the
/// same user are last-write-wins.
pub struct AttachPhotoToUser {
    users: UserRepository,
    uploader: Arc<dyn MediaUploader>,
}

impl AttachPhotoToUser {
    pub fn new(users: UserRepository, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { users, uploader }
    }

    pub async fn execute(&self, user_id: Uuid, file: UploadedFile) -> Result<User, AppError> {
        // Missing users are rejected before anything reaches the media host.
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

        let media = self.uploader.upload(file).await?;

        let url = match InputValidator::validate_hosted_url(&media.url) {
            Ok(url) => url,
            Err(e) => {
                discard_upload(self.uploader.as_ref(), &media).await;
                return Err(e);
            }
        };

        match self.users.set_picture(user_id, &url).await {
            Ok(updated) => {
                tracing::info!(%user_id, "Attached picture to user");
                Ok(updated.into())
            }
            Err(e) => {
                discard_upload(self.uploader.as_ref(), &media).await;
                Err(map_db_err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use crate::domain::HostedMedia;
    use crate::test_utils::{image, memory_db, FakeUploader};
    use async_trait::async_trait;
    use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

    /// Uploads through `inner`, dropping the `users` table first so the
    /// following write cannot succeed.
    struct TableDroppingUploader {
        db: DatabaseConnection,
        inner: FakeUploader,
    }

    #[async_trait]
    impl MediaUploader for TableDroppingUploader {
        async fn upload(&self, file: UploadedFile) -> Result<HostedMedia, AppError> {
            self.db
                .execute(Statement::from_string(
                    self.db.get_database_backend(),
                    "DROP TABLE users".to_string(),
                ))
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            self.inner.upload(file).await
        }

        async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
            self.inner.destroy(public_id).await
        }
    }

    async fn setup(uploader: FakeUploader) -> (UserRepository, Arc<FakeUploader>, User) {
        let users = UserRepository::new(memory_db().await);
        let user: User = users
            .create(&NewUser::new("Alice".into(), "Paris".into()))
            .await
            .unwrap()
            .into();
        (users, Arc::new(uploader), user)
    }

    #[tokio::test]
    async fn test_attach_sets_picture_only() {
        let (users, uploader, user) = setup(FakeUploader::new()).await;
        let attach = AttachPhotoToUser::new(users.clone(), uploader.clone());

        let updated = attach.execute(user.id, image(b"jpeg")).await.unwrap();

        assert_eq!(updated.picture, Some(FakeUploader::url_for(1)));
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.city, user.city);

        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.picture, Some(FakeUploader::url_for(1)));
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_user_untouched() {
        let (users, uploader, user) = setup(FakeUploader::new()).await;
        AttachPhotoToUser::new(users.clone(), uploader)
            .execute(user.id, image(b"first"))
            .await
            .unwrap();
        let before = users.find_by_id(user.id).await.unwrap().unwrap();

        let failing = AttachPhotoToUser::new(users.clone(), Arc::new(FakeUploader::failing()));
        let result = failing.execute(user.id, image(b"second")).await;

        assert!(matches!(result, Err(AppError::Upload(_))));
        let after = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_missing_user_skips_upload() {
        let (users, uploader, _) = setup(FakeUploader::new()).await;
        let attach = AttachPhotoToUser::new(users, uploader.clone());

        let result = attach.execute(Uuid::new_v4(), image(b"jpeg")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(uploader.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_hosted_url_is_never_written() {
        let (users, uploader, user) = setup(FakeUploader::returning_url("not a url")).await;
        let attach = AttachPhotoToUser::new(users.clone(), uploader.clone());

        let result = attach.execute(user.id, image(b"jpeg")).await;

        assert!(result.is_err());
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.picture, None);
        assert_eq!(uploader.destroyed(), vec!["fake-1".to_string()]);
    }

    #[tokio::test]
    async fn test_picture_is_stored_exactly_as_hosted() {
        let (users, uploader, user) = setup(FakeUploader::returning_url("https://media.test")).await;
        let attach = AttachPhotoToUser::new(users.clone(), uploader);

        let updated = attach.execute(user.id, image(b"jpeg")).await.unwrap();

        assert_eq!(updated.picture.as_deref(), Some("https://media.test"));
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.picture.as_deref(), Some("https://media.test"));
    }

    #[tokio::test]
    async fn test_persist_failure_discards_upload() {
        let db = memory_db().await;
        let users = UserRepository::new(db.clone());
        let user = users
            .create(&NewUser::new("Alice".into(), "Paris".into()))
            .await
            .unwrap();
        let uploader = Arc::new(TableDroppingUploader {
            db,
            inner: FakeUploader::new(),
        });
        let attach = AttachPhotoToUser::new(users, uploader.clone());

        let result = attach.execute(user.id, image(b"jpeg")).await;

        assert!(matches!(
            result,
            Err(AppError::Database(_)) | Err(AppError::NotFound(_))
        ));
        assert_eq!(uploader.inner.destroyed(), vec!["fake-1".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_attach_is_last_write_wins() {
        let (users, uploader, user) = setup(FakeUploader::new()).await;
        let attach = Arc::new(AttachPhotoToUser::new(users.clone(), uploader));

        let (a, b) = tokio::join!(
            attach.execute(user.id, image(b"one")),
            attach.execute(user.id, image(b"two")),
        );
        assert!(a.is_ok() && b.is_ok());

        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        let candidates = [FakeUploader::url_for(1), FakeUploader::url_for(2)];
        assert!(stored
            .picture
            .as_ref()
            .is_some_and(|p| candidates.contains(p)));
    }
}
