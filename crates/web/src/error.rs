use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use p10_storage::error::StorageError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation {
        message: String,
        details: Option<Value>,
    },
    InvalidQuery {
        message: String,
        details: Option<Value>,
    },
    RouteNotFound,
}

impl WebError {
    pub fn validation(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Attaches the offending input to a validation error.
    pub fn with_details(self, details: Value) -> Self {
        match self {
            Self::Validation { message, .. } => Self::Validation {
                message,
                details: Some(details),
            },
            Self::InvalidQuery { message, .. } => Self::InvalidQuery {
                message,
                details: Some(details),
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::NotFound) | Self::RouteNotFound => "NOT_FOUND",
            Self::Storage(StorageError::Conflict(_)) => "PICK_ALREADY_EXISTS",
            Self::Storage(_) => "INTERNAL_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidQuery { .. } => "INVALID_QUERY_PARAMS",
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation { message, .. } => write!(f, "Validation error: {}", message),
            Self::InvalidQuery { message, .. } => write!(f, "Invalid query: {}", message),
            Self::RouteNotFound => write!(f, "Route not found"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code();

        let (message, details) = match self {
            Self::Storage(StorageError::NotFound) => ("Pick not found".to_string(), None),
            Self::Storage(StorageError::Conflict(msg)) => (msg, None),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ("Internal Server Error".to_string(), None)
            }
            Self::Validation { message, details } => (message, details),
            Self::InvalidQuery { message, details } => (message, details),
            Self::RouteNotFound => ("Route not found".to_string(), None),
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
            details,
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{}: {}", field, e.code))
                })
            })
            .collect();
        messages.sort();
        messages.dedup();

        Self::validation(messages.join("; "), None)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text(), None)
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery {
            message: rejection.body_text(),
            details: None,
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
