use crate::domain::User;
use crate::infrastructure::db::{map_db_err, UserRepository};
use gallery_errors::AppError;

pub struct ListUsers {
    users: UserRepository,
}

impl ListUsers {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn execute(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.find_all().await.map_err(map_db_err)?;
        Ok(users.into_iter().map(User::from).collect())
    }
}
