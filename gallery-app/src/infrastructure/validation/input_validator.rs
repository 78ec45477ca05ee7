use crate::domain::{NewUser, UploadedFile};
use gallery_errors::AppError;
use uuid::Uuid;

const MAX_TEXT_LENGTH: usize = 256;
const MAX_URL_LENGTH: usize = 2048;
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

pub struct InputValidator;

impl InputValidator {
    /// Required text field: trimmed, non-empty, bounded.
    pub fn validate_text_field(field: &str, value: Option<&str>) -> Result<String, AppError> {
        let value = value
            .map(str::trim)
            .ok_or_else(|| AppError::Validation(format!("{field} is missing")))?;

        if value.is_empty() {
            return Err(AppError::Validation(format!("{field} is empty")));
        }

        if value.chars().count() > MAX_TEXT_LENGTH {
            return Err(AppError::Validation(format!("{field} is too long")));
        }

        Ok(value.to_string())
    }

    pub fn validate_new_user(name: Option<&str>, city: Option<&str>) -> Result<NewUser, AppError> {
        let name = Self::validate_text_field("name", name)?;
        let city = Self::validate_text_field("city", city)?;
        Ok(NewUser::new(name, city))
    }

    /// A URL coming back from the media host must be absolute http(s) with a
    /// host before it is stored anywhere. The value is stored as the host
    /// returned it, only trimmed.
    pub fn validate_hosted_url(url: &str) -> Result<String, AppError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::Upload("media host returned no URL".to_string()));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::Upload("media host returned an oversized URL".to_string()));
        }

        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::Upload(format!("media host returned a bad URL: {e}")))?;

        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(AppError::Upload(format!(
                "media host returned a {} URL",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none() {
            return Err(AppError::Upload("media host URL has no host".to_string()));
        }

        Ok(url.to_string())
    }

    pub fn validate_file(field: &str, file: Option<UploadedFile>) -> Result<UploadedFile, AppError> {
        let file = file.ok_or_else(|| AppError::Validation(format!("{field} file is missing")))?;
        if file.is_empty() {
            return Err(AppError::Validation(format!("{field} file is empty")));
        }
        Ok(file)
    }

    pub fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw.trim())
            .map_err(|e| AppError::Validation(format!("invalid user id {raw:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_new_user() {
        let user = InputValidator::validate_new_user(Some(" Alice "), Some("Paris")).unwrap();
        assert_eq!(user, NewUser::new("Alice".into(), "Paris".into()));
    }

    #[test]
    fn test_missing_or_blank_fields() {
        assert!(InputValidator::validate_new_user(None, Some("Paris")).is_err());
        assert!(InputValidator::validate_new_user(Some("Alice"), None).is_err());
        assert!(InputValidator::validate_new_user(Some("Alice"), Some("   ")).is_err());
        assert!(InputValidator::validate_new_user(Some(&"x".repeat(300)), Some("Paris")).is_err());
    }

    #[test]
    fn test_hosted_url() {
        assert!(InputValidator::validate_hosted_url(
            "https://res.cloudinary.com/demo/image/upload/v1/sample.jpg"
        )
        .is_ok());
        assert_eq!(
            InputValidator::validate_hosted_url(" https://Media.test ").unwrap(),
            "https://Media.test"
        );
        assert!(InputValidator::validate_hosted_url("").is_err());
        assert!(InputValidator::validate_hosted_url("/relative/path.jpg").is_err());
        assert!(InputValidator::validate_hosted_url("https://").is_err());
        assert!(InputValidator::validate_hosted_url("ftp://host/a.jpg").is_err());
    }

    #[test]
    fn test_validate_file() {
        assert!(InputValidator::validate_file("picture", None).is_err());
        assert!(InputValidator::validate_file("picture", Some(UploadedFile::new(vec![]))).is_err());
        assert!(InputValidator::validate_file("picture", Some(UploadedFile::new(vec![1, 2]))).is_ok());
    }

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(InputValidator::parse_user_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            InputValidator::parse_user_id("5dd659d5bb1e69073f631c0e"),
            Err(AppError::Validation(_))
        ));
    }
}
