use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Generic per-operation failure; the underlying cause has already been logged.
    #[error("Operation failed: {0}")]
    Failed(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errors whose status and message are meant for the caller verbatim.
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
                | AppError::BadRequest(_)
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    status_msg: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Failed(msg) => msg.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            other => {
                tracing::error!("Unhandled error: {}", other);
                crate::messages::request::INTERNAL.to_string()
            }
        };

        (
            status,
            Json(ErrorBody {
                status_code: status.as_u16(),
                status_msg: message,
            }),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Collapses infrastructure failures into a single localized message while
/// letting authorization, not-found, conflict and validation errors through.
pub trait OrFail<T> {
    fn or_collapse(self, fallback: AppError) -> AppResult<T>;

    fn or_fail(self, message: &'static str) -> AppResult<T>
    where
        Self: Sized,
    {
        self.or_collapse(AppError::Failed(message))
    }
}

impl<T, E: Into<AppError>> OrFail<T> for Result<T, E> {
    fn or_collapse(self, fallback: AppError) -> AppResult<T> {
        self.map_err(|err| {
            let err = err.into();
            if err.is_client_facing() {
                err
            } else {
                tracing::error!(error = %err, "{}", fallback);
                fallback
            }
        })
    }
}
