use super::entities::{photo, Photo};
use sea_orm::{entity::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct PhotoRepository {
    db: DatabaseConnection,
}

impl PhotoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, url: &str) -> Result<photo::Model, DbErr> {
        let active = photo::ActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(url.to_string()),
        };
        active.insert(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<photo::Model>, DbErr> {
        Photo::find().all(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::memory_db;

    #[tokio::test]
    async fn test_create_photo() {
        let repo = PhotoRepository::new(memory_db().await);

        let photo = repo.create("https://cdn.example.com/p.png").await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![photo]);
    }
}
