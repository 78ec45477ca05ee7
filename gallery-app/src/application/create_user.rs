use crate::domain::{NewUser, User};
use crate::infrastructure::db::{map_db_err, UserRepository};
use gallery_errors::AppError;

pub struct CreateUser {
    users: UserRepository,
}

impl CreateUser {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn execute(&self, new_user: NewUser) -> Result<User, AppError> {
        let created = self.users.create(&new_user).await.map_err(map_db_err)?;
        tracing::info!(user_id = %created.id, "Created user");
        Ok(created.into())
    }
}
