use crate::application::{AttachPhotoToUser, CreateUser, ListUsers, UploadPhoto};
use crate::infrastructure::cloudinary::CloudinaryClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::db::{self, PhotoRepository, UserRepository};
use crate::infrastructure::uploader::MediaUploader;
use gallery_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

/// Everything a request handler needs. Built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub list_users: Arc<ListUsers>,
    pub create_user: Arc<CreateUser>,
    pub attach_photo: Arc<AttachPhotoToUser>,
    pub upload_photo: Arc<UploadPhoto>,
    pub photo_target_user_id: Option<Uuid>,
}

impl AppContext {
    pub fn new(
        db: DatabaseConnection,
        uploader: Arc<dyn MediaUploader>,
        photo_target_user_id: Option<Uuid>,
    ) -> Self {
        let users = UserRepository::new(db.clone());
        let photos = PhotoRepository::new(db);

        Self {
            list_users: Arc::new(ListUsers::new(users.clone())),
            create_user: Arc::new(CreateUser::new(users.clone())),
            attach_photo: Arc::new(AttachPhotoToUser::new(users, uploader.clone())),
            upload_photo: Arc::new(UploadPhoto::new(photos, uploader)),
            photo_target_user_id,
        }
    }

    /// Connects to the database, makes sure the tables exist and wires the
    /// media client. Fails instead of returning a half-working context.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let connection = db::create_connection(&config.database_url)
            .await
            .map_err(|e| AppError::Database(format!("failed to connect: {e}")))?;
        db::create_schema(&connection)
            .await
            .map_err(|e| AppError::Database(format!("failed to create schema: {e}")))?;
        tracing::info!("Database ready");

        let uploader = Arc::new(CloudinaryClient::new(config.cloudinary.clone()));
        tracing::info!(cloud_name = %config.cloudinary.cloud_name, "Using Cloudinary media host");

        Ok(Self::new(connection, uploader, config.photo_target_user_id))
    }
}
