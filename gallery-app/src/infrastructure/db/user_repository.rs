use super::entities::{user, User};
use crate::domain::NewUser;
use sea_orm::{entity::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every user, in whatever order the store returns them.
    pub async fn find_all(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find().all(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn create(&self, new_user: &NewUser) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name.clone()),
            city: Set(new_user.city.clone()),
            picture: Set(None),
        };
        active.insert(&self.db).await
    }

    /// Writes only the `picture` column. Fails with `RecordNotUpdated` when
    /// no user has this id.
    pub async fn set_picture(&self, id: Uuid, url: &str) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Unchanged(id),
            picture: Set(Some(url.to_string())),
            ..Default::default()
        };
        active.update(&self.db).await
    }
}
