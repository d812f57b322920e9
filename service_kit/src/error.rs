use std::any::Any;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while assembling or running a service.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config Error: {0}")]
    Config(String),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "lambda")]
    #[error("Serverless Error: {0}")]
    Serverless(lambda_http::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failure kinds a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Internal,
    Panic,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    BadRequest,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Internal => "Internal",
            ErrorKind::Panic => "Panic",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::MethodNotAllowed => "MethodNotAllowed",
            ErrorKind::PayloadTooLarge => "PayloadTooLarge",
            ErrorKind::BadRequest => "BadRequest",
        };
        f.write_str(name)
    }
}

/// One segment of the location of an invalid input, e.g. `["body", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

/// A single problem found while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    pub fn new(loc: Vec<LocSegment>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Every way a handler can fail, as seen by the client.
///
/// `Internal` and `Panic` are rendered as
/// `{"detail": "Internal Server Error: <kind>[ - <message>]"}` with status 500.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<ValidationIssue>),
    #[error("{0}")]
    Internal(String),
    #[error("{}", .0.as_deref().unwrap_or("handler panicked"))]
    Panic(Option<String>),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    detail: T,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Internal(_) => ErrorKind::Internal,
            ApiError::Panic(_) => ErrorKind::Panic,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            ApiError::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            ApiError::BadRequest(_) => ErrorKind::BadRequest,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) | ApiError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The `detail` string of a 500 response.
    pub fn server_error_detail(&self) -> String {
        let message = match self {
            ApiError::Internal(message) => Some(message.as_str()),
            ApiError::Panic(message) => message.as_deref(),
            _ => None,
        };
        match message.filter(|m| !m.is_empty()) {
            Some(message) => format!("Internal Server Error: {} - {}", self.kind(), message),
            None => format!("Internal Server Error: {}", self.kind()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(issues) => {
                (status, Json(ErrorBody { detail: issues })).into_response()
            }
            ApiError::Internal(_) | ApiError::Panic(_) => {
                let detail = self.server_error_detail();
                tracing::error!(kind = %self.kind(), "{}", detail);
                (status, Json(ErrorBody { detail })).into_response()
            }
            ApiError::NotFound
            | ApiError::MethodNotAllowed
            | ApiError::PayloadTooLarge(_)
            | ApiError::BadRequest(_) => {
                (status, Json(ErrorBody { detail: self.to_string() })).into_response()
            }
        }
    }
}

/// Turns a panic payload caught by `CatchPanicLayer` into a 500 response.
pub(crate) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        payload.downcast_ref::<&str>().map(|s| s.to_string())
    };
    ApiError::Panic(message).into_response()
}
