use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DestroyResponse {
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
