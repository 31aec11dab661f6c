//! Errors surfaced by [`crate::BoardClient`].

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::json::decode_envelope;
use crate::model::ErrorBody;

/// Failure of a client call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The base URL could not be parsed or joined.
    #[error("invalid base URL: {message}")]
    InvalidUrl { message: String },
    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The server answered 404.
    #[error("not found: {message}")]
    NotFound { message: String },
    /// The server rejected the request body or a reference in it.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },
    /// Any other non-success status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// A success response whose body is not the expected entity.
    #[error("could not decode response: {message}")]
    Decode { message: String },
}

impl ClientError {
    pub(crate) fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    pub(crate) fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// `true` for [`ClientError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error.to_string())
    }
}

const PREVIEW_CHAR_LIMIT: usize = 160;

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Map a non-success response to the matching error variant.
pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    let (message, details) = match decode_envelope::<ErrorBody>(body) {
        Ok(parsed) => {
            tracing::debug!(
                code = %parsed.code,
                trace_id = parsed.trace_id.as_deref().unwrap_or("-"),
                "server returned error body"
            );
            (parsed.message, parsed.details)
        }
        Err(_) => {
            let preview = body_preview(body);
            let message = if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                preview
            };
            (message, None)
        }
    };

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound { message },
        StatusCode::BAD_REQUEST => ClientError::Validation { message, details },
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}
