use crate::core::upstream::LegacyUpstream;
use crate::utils::constants::{MSG_IMAGE_REQUIRED, MSG_METHOD_NOT_ALLOWED};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: LegacyUpstream,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    MissingImage,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorBody {
                    error: MSG_METHOD_NOT_ALLOWED.to_string(),
                }),
            )
                .into_response(),
            AppError::MissingImage => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: MSG_IMAGE_REQUIRED.to_string(),
                }),
            )
                .into_response(),
            AppError::Internal(message) => {
                tracing::error!(error = %message, "generate request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorsBody {
                        errors: vec![message],
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<crate::core::error::GenerationError> for AppError {
    fn from(err: crate::core::error::GenerationError) -> Self {
        AppError::Internal(err.to_string())
    }
}
