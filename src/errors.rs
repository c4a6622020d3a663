use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read log file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write log file: {0}")]
    Write(#[source] std::io::Error),

    #[error("log file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("week {0} is not part of the plan")]
    UnknownWeek(u8),

    #[error("duration and RPE are required")]
    InvalidLog,

    #[error("RPE must be a whole number from 1 to 10")]
    RpeOutOfRange,
}

/// Failures of the readiness proxy, each mapped to the JSON error payload
/// the endpoint answers with.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing OURA_TOKEN credential")]
    MissingCredential,

    #[error("Oura API error")]
    Upstream { status: u16, detail: String },

    #[error("Fetch Oura readiness failed")]
    Fetch(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Fetch(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match self {
            ProxyError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error,
                    status: None,
                    detail: None,
                },
            ),
            ProxyError::Upstream { status, detail } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorBody {
                    error,
                    status: Some(status),
                    detail: Some(detail),
                },
            ),
            ProxyError::Fetch(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error,
                    status: None,
                    detail: Some(detail),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Failures seen by the view-model when it calls the proxy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("readiness request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("readiness request returned {status}: {message}")]
    Status { status: u16, message: String },
}
