use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_openai::error::OpenAIError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed generation payload: {0}")]
    MalformedPayload(String),

    #[error("Generation timed out: {0}")]
    Timeout(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Generation backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{} ({})", self, self.error_code());
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

impl From<OpenAIError> for AppError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(_) => AppError::BackendUnavailable(err.to_string()),
            _ => AppError::GenerationFailed(err.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
