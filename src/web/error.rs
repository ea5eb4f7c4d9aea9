use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::ops::task_ops::TaskError;
use crate::service::ServiceError;
use crate::web::dto::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    /// A request body the form extractor refused for a reason other than
    /// its contents, such as a wrong content type
    #[error("bad request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "TASK_NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Rejected { .. } => "BAD_REQUEST",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Task(TaskError::NotFound(id)) => ApiError::NotFound { entity: "task", id },
            ServiceError::Task(e @ TaskError::EmptyDescription) => ApiError::Validation {
                message: e.to_string(),
            },
            ServiceError::Store(e) => ApiError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        let status = rejection.status();
        let message = rejection.body_text();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::Validation { message }
        } else {
            ApiError::Rejected { status, message }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = ErrorResponse::new(self.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
