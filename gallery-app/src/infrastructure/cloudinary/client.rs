use super::signature::sign_params;
use super::types::{DestroyResponse, ErrorResponse, UploadResponse};
use crate::domain::{HostedMedia, UploadedFile};
use crate::infrastructure::uploader::MediaUploader;
use async_trait::async_trait;
use gallery_errors::AppError;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};

const CLOUDINARY_API_URL: &str = "https://api.cloudinary.com";
const DEFAULT_FILE_NAME: &str = "upload";

#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: SecretString,
}

pub struct CloudinaryClient {
    http_client: reqwest::Client,
    base_url: String,
    credentials: CloudinaryCredentials,
}

impl CloudinaryClient {
    pub fn new(credentials: CloudinaryCredentials) -> Self {
        Self::with_base_url(credentials, CLOUDINARY_API_URL)
    }

    pub fn with_base_url(credentials: CloudinaryCredentials, base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.base_url, self.credentials.cloud_name, action
        )
    }

    /// Adds `api_key`, `timestamp` and `signature` to `params` and builds the
    /// form around them.
    fn signed_form(&self, params: &[(&str, &str)]) -> Form {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut to_sign = params.to_vec();
        to_sign.push(("timestamp", &timestamp));
        let signature = sign_params(&to_sign, self.credentials.api_secret.expose_secret());

        let mut form = Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature);
        for (key, value) in to_sign {
            form = form.text(key.to_string(), value.to_string());
        }
        form
    }

    async fn post(&self, action: &str, form: Form) -> Result<reqwest::Response, AppError> {
        let response = self
            .http_client
            .post(self.endpoint(action))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Cloudinary {} error: {} - {}", action, status, detail);
            return Err(AppError::Upload(format!("API error: {status}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl MediaUploader for CloudinaryClient {
    async fn upload(&self, file: UploadedFile) -> Result<HostedMedia, AppError> {
        let size = file.len();
        let file_name = file
            .file_name
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        let mut part = Part::bytes(file.bytes).file_name(file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::Upload(e.to_string()))?;
        }

        let form = self.signed_form(&[]).part("file", part);
        let uploaded: UploadResponse = self
            .post("upload", form)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        tracing::info!(public_id = %uploaded.public_id, size, "Uploaded media");

        Ok(HostedMedia {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        let form = self.signed_form(&[("public_id", public_id)]);
        let destroyed: DestroyResponse = self
            .post("destroy", form)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        if destroyed.result != "ok" {
            return Err(AppError::Upload(format!(
                "destroy of {public_id} returned {}",
                destroyed.result
            )));
        }

        Ok(())
    }
}
