//! Request body extractors. Each one turns a loosely typed body into a fixed
//! input shape and rejects anything else with `AppError::Validation`, which
//! the client only ever sees as the generic 400.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use gallery_app::domain::{NewUser, UploadedFile};
use gallery_app::infrastructure::validation::InputValidator;
use gallery_errors::AppError;
use serde_json::Value;
use std::collections::HashMap;

const PICTURE_FIELD: &str = "picture";
const USER_ID_FIELD: &str = "id";

/// `name` and `city` from a JSON, urlencoded or multipart body.
pub struct UserForm(pub NewUser);

impl<S> FromRequest<S> for UserForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let new_user = match content_type(&req).as_str() {
            ct if ct.starts_with("application/json") => {
                let Json(body) = Json::<Value>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                InputValidator::validate_new_user(
                    json_text(&body, "name")?,
                    json_text(&body, "city")?,
                )?
            }
            ct if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                let fields = multipart_text_fields(multipart).await?;
                InputValidator::validate_new_user(
                    fields.get("name").map(String::as_str),
                    fields.get("city").map(String::as_str),
                )?
            }
            _ => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                InputValidator::validate_new_user(
                    fields.get("name").map(String::as_str),
                    fields.get("city").map(String::as_str),
                )?
            }
        };

        Ok(Self(new_user))
    }
}

/// A multipart body carrying a `picture` file and, optionally, the target
/// user's `id`. Any other field is drained and ignored.
pub struct PhotoForm {
    pub picture: Option<UploadedFile>,
    pub user_id: Option<String>,
    pub ignored_fields: Vec<String>,
}

impl<S> FromRequest<S> for PhotoForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut form = PhotoForm {
            picture: None,
            user_id: None,
            ignored_fields: Vec::new(),
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                PICTURE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?;
                    form.picture = Some(
                        UploadedFile::new(bytes.to_vec())
                            .with_file_name(file_name)
                            .with_content_type(content_type),
                    );
                }
                USER_ID_FIELD => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?;
                    form.user_id = Some(value);
                }
                _ => {
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?;
                    form.ignored_fields.push(name);
                }
            }
        }

        Ok(form)
    }
}

fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// `Ok(None)` when the key is absent, an error when it holds anything but a
/// string.
fn json_text<'a>(body: &'a Value, key: &str) -> Result<Option<&'a str>, AppError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(AppError::Validation(format!(
            "{key} must be text, got {other}"
        ))),
    }
}

async fn multipart_text_fields(
    mut multipart: Multipart,
) -> Result<HashMap<String, String>, AppError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            return Err(AppError::Validation(format!("{name} must be text, got a file")));
        }
        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text() {
        let body = json!({ "name": "Alice", "city": [], "note": null });
        assert_eq!(json_text(&body, "name").unwrap(), Some("Alice"));
        assert_eq!(json_text(&body, "note").unwrap(), None);
        assert_eq!(json_text(&body, "missing").unwrap(), None);
        assert!(json_text(&body, "city").is_err());
    }
}
