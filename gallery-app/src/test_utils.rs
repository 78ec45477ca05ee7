//! Helpers shared by unit tests here and by the HTTP tests in `gallery-api`.

use crate::domain::{HostedMedia, UploadedFile};
use crate::infrastructure::db::create_schema;
use crate::infrastructure::uploader::MediaUploader;
use async_trait::async_trait;
use gallery_errors::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // every pooled connection would otherwise get its own empty database
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    create_schema(&db).await.expect("failed to create schema");
    db
}

enum Behavior {
    Succeed,
    Fail,
    FixedUrl(String),
}

/// In-process stand-in for the media host.
pub struct FakeUploader {
    behavior: Behavior,
    uploads: AtomicUsize,
    destroyed: Mutex<Vec<String>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Succeed)
    }

    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    /// Every upload "succeeds" and reports this URL, valid or not.
    pub fn returning_url(url: &str) -> Self {
        Self::with_behavior(Behavior::FixedUrl(url.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            uploads: AtomicUsize::new(0),
            destroyed: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn url_for(n: usize) -> String {
        format!("https://media.test/image/upload/{n}.jpg")
    }
}

impl Default for FakeUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, file: UploadedFile) -> Result<HostedMedia, AppError> {
        if file.is_empty() {
            return Err(AppError::Upload("empty file".to_string()));
        }

        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let public_id = format!("fake-{n}");
        match &self.behavior {
            Behavior::Succeed => Ok(HostedMedia {
                url: Self::url_for(n),
                public_id,
            }),
            Behavior::Fail => Err(AppError::Upload("fake host rejected the file".to_string())),
            Behavior::FixedUrl(url) => Ok(HostedMedia {
                url: url.clone(),
                public_id,
            }),
        }
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub fn image(bytes: &[u8]) -> UploadedFile {
    UploadedFile::new(bytes.to_vec())
        .with_file_name(Some("photo.jpg".to_string()))
        .with_content_type(Some("image/jpeg".to_string()))
}
