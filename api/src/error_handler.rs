use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR, // startup-only
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::Http { status, .. } => *status,

            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Store outages surface as gateway errors; config issues stay 500.
impl From<doc_store::StoreError> for AppError {
    fn from(err: doc_store::StoreError) -> Self {
        match err {
            doc_store::StoreError::Config(msg) => AppError::Config(msg),
            other => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "STORE_ERROR",
                message: other.to_string(),
            },
        }
    }
}

impl From<chat_core::ChatError> for AppError {
    fn from(err: chat_core::ChatError) -> Self {
        match err {
            chat_core::ChatError::Config(msg) => AppError::Config(msg),
            chat_core::ChatError::Store(e) => e.into(),
            chat_core::ChatError::Llm(e) => e.into(),
        }
    }
}

impl From<llm_service::LlmServiceError> for AppError {
    fn from(err: llm_service::LlmServiceError) -> Self {
        match err {
            llm_service::LlmServiceError::Config(e) => AppError::Config(e.to_string()),
            other => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LLM_ERROR",
                message: other.to_string(),
            },
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
