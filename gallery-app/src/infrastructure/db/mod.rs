pub mod entities;
mod photo_repository;
mod user_repository;

pub use photo_repository::PhotoRepository;
pub use user_repository::UserRepository;

use entities::{Photo, User};
use gallery_errors::AppError;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates the `users` and `photos` tables for whichever backend `db` speaks.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, User).await?;
    create_table(db, Photo).await
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}

pub(crate) fn map_db_err(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
        DbErr::RecordNotUpdated => AppError::NotFound("no row was updated".to_string()),
        other => AppError::Database(other.to_string()),
    }
}
