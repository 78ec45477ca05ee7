use crate::extract::{PhotoForm, UserForm};
use axum::{extract::State, Json};
use gallery_app::domain::{Photo, User};
use gallery_app::infrastructure::validation::InputValidator;
use gallery_app::AppContext;
use gallery_errors::AppError;
use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
    message: &'static str,
}

pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Hello World",
    })
}

pub async fn list_users(State(ctx): State<AppContext>) -> Result<Json<Vec<User>>, AppError> {
    let users = ctx.list_users.execute().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(ctx): State<AppContext>,
    UserForm(new_user): UserForm,
) -> Result<Json<User>, AppError> {
    let user = ctx.create_user.execute(new_user).await?;
    Ok(Json(user))
}

/// The target user comes from the `id` form field, falling back to the
/// configured default target.
pub async fn add_photo_to_user(
    State(ctx): State<AppContext>,
    form: PhotoForm,
) -> Result<Json<User>, AppError> {
    let user_id = match form.user_id.as_deref() {
        Some(raw) => InputValidator::parse_user_id(raw)?,
        None => ctx
            .photo_target_user_id
            .ok_or_else(|| AppError::Validation("no target user id".to_string()))?,
    };
    let file = InputValidator::validate_file("picture", form.picture)?;

    let user = ctx.attach_photo.execute(user_id, file).await?;
    Ok(Json(user))
}

pub async fn upload_photo(
    State(ctx): State<AppContext>,
    form: PhotoForm,
) -> Result<Json<Photo>, AppError> {
    tracing::debug!(
        has_picture = form.picture.is_some(),
        ignored = ?form.ignored_fields,
        "Received upload"
    );
    let file = InputValidator::validate_file("picture", form.picture)?;

    let photo = ctx.upload_photo.execute(file).await?;
    Ok(Json(photo))
}
