use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::task::JoinError;
use tracing::error;
use waypoint_optimizer::{
    error::{OptimizeError, ValidationError},
    json::types::JsonError,
};

pub enum ApiError {
    BadRequest(JsonError),
    InternalServerError(JsonError),
}

impl From<OptimizeError> for ApiError {
    fn from(error: OptimizeError) -> Self {
        let body = JsonError::from(&error);
        match error {
            OptimizeError::Validation(_) => ApiError::BadRequest(body),
            OptimizeError::Internal(_) => {
                error!(message = %body.message, "optimization failed");
                ApiError::InternalServerError(body)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::from(OptimizeError::from(error))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from(ValidationError::MalformedBody(rejection.body_text()))
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        ApiError::from(OptimizeError::Internal(format!("worker task failed: {error}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(body) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
        }
    }
}
