//! Error types for the route service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use evacroute_core::RouteError;
use serde::Serialize;
use thiserror::Error;

/// Startup failures: configuration and floor datasets
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load floor {id}: {source}")]
    Floor {
        id: String,
        #[source]
        source: evacroute_core::Error,
    },
}

impl From<toml::de::Error> for ServerError {
    fn from(e: toml::de::Error) -> Self {
        ServerError::Config(e.to_string())
    }
}

/// Request failures, rendered as a JSON error body
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unknown floor: {0}")]
    UnknownFloor(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownFloor(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Route(err) if err.is_invalid_request() => StatusCode::BAD_REQUEST,
            ApiError::Route(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
