use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scanner::ScanError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Token address is required")]
    MissingAddress,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid token address: `{0}`")]
    InvalidAddress(String),

    #[error("Score must be a number between 0 and 100")]
    InvalidScore,

    #[error("Cache error: {0}")]
    Cache(String),
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidAddress(address) => ApiError::InvalidAddress(address),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingAddress
            | ApiError::MissingFields
            | ApiError::InvalidAddress(_)
            | ApiError::InvalidScore => StatusCode::BAD_REQUEST,
            ApiError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
