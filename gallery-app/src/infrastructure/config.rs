use super::cloudinary::CloudinaryCredentials;
use secrecy::SecretString;
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

const DEFAULT_PORT: &str = "3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cloudinary: CloudinaryCredentials,
    /// User that `/add-photo-to-user` targets when the request names none.
    pub photo_target_user_id: Option<Uuid>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cloudinary = CloudinaryCredentials {
            cloud_name: required(&lookup, "CLOUDINARY_CLOUD_NAME")?,
            api_key: required(&lookup, "CLOUDINARY_API_KEY")?,
            api_secret: SecretString::from(required(&lookup, "CLOUDINARY_API_SECRET")?),
        };

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            port: parse(
                "PORT",
                lookup("PORT").unwrap_or_else(|| {
                    tracing::info!("PORT not set, using default: {DEFAULT_PORT}");
                    DEFAULT_PORT.to_string()
                }),
            )?,
            cloudinary,
            photo_target_user_id: lookup("PHOTO_TARGET_USER_ID")
                .filter(|v| !v.trim().is_empty())
                .map(|v| parse("PHOTO_TARGET_USER_ID", v))
                .transpose()?,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/gallery"),
        ("CLOUDINARY_CLOUD_NAME", "demo"),
        ("CLOUDINARY_API_KEY", "123"),
        ("CLOUDINARY_API_SECRET", "shh"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(env(BASE)).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cloudinary.api_secret.expose_secret(), "shh");
        assert!(config.photo_target_user_id.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(env(&BASE[1..])).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_values() {
        let mut pairs = BASE.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(matches!(
            Config::from_lookup(env(&pairs)),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));

        let mut pairs = BASE.to_vec();
        pairs.push(("PHOTO_TARGET_USER_ID", "5dd659d5bb1e69073f631c0e"));
        assert!(matches!(
            Config::from_lookup(env(&pairs)),
            Err(ConfigError::Invalid { key: "PHOTO_TARGET_USER_ID", .. })
        ));
    }

    #[test]
    fn test_target_user_id() {
        let id = Uuid::new_v4().to_string();
        let mut pairs: Vec<(&str, &str)> = BASE.to_vec();
        pairs.push(("PHOTO_TARGET_USER_ID", &id));
        let config = Config::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.photo_target_user_id.map(|u| u.to_string()), Some(id));
    }
}
