/*
[INPUT]:  Error sources (input validation, transport, exchange rejections, decoding)
[OUTPUT]: Structured error types callers can branch on without parsing messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or exchange error codes
*/

use std::borrow::Cow;
use std::fmt;

use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Exchange error codes that indicate the request was not authenticated
const AUTH_ERROR_CODES: &[&str] = &[
    "InvalidSignature",
    "InvalidApiKey",
    "InvalidNonce",
    "ExpiredTimestamp",
    "InvalidTimestamp",
    "Unauthorized",
];

/// Main error type for the Biscoint adapter
#[derive(Error, Debug)]
pub enum BiscointError {
    /// Parameters were rejected locally, before any network I/O
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request never produced an HTTP response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The exchange answered with a non-success status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A success response could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl BiscointError {
    /// Check if the error is worth retrying by the caller.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            BiscointError::Transport(_) => true,
            BiscointError::Api(err) => {
                err.status_code == StatusCode::TOO_MANY_REQUESTS.as_u16()
                    || err.status_code >= 500
            }
            BiscointError::InvalidInput(_) | BiscointError::Decode(_) => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, BiscointError::Api(err) if err.is_auth_error())
    }

    /// Exchange error details, if the exchange rejected the request
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            BiscointError::Api(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        BiscointError::InvalidInput(message.into())
    }
}

/// Coarse classification of transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Transport-level failure (connection refused, timeout, DNS)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transport error ({kind}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, err.to_string())
    }
}

/// The exchange explicitly rejected a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error (status {status_code}, code {error_code}): {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub error_code: String,
    pub message: String,
    /// Response body exactly as received
    pub raw: Vec<u8>,
}

/// Keys that may carry the error code, most specific first
const ERROR_CODE_KEYS: &[&str] = &["errorCode", "error", "code"];

impl ApiError {
    /// Classify a non-success response.
    ///
    /// Fields are looked up one by one, so extra or malformed fields never
    /// hide `errorCode` or `message`. Bodies that are not a JSON object still
    /// produce an error, with the code taken from the HTTP status.
    pub fn from_response(status_code: u16, body: &[u8]) -> Self {
        let fields = serde_json::from_slice::<Map<String, Value>>(body).unwrap_or_default();

        let error_code = ERROR_CODE_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(code_text))
            .unwrap_or_else(|| status_error_code(status_code));

        let message = fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

        Self {
            status_code,
            error_code,
            message,
            raw: body.to_vec(),
        }
    }

    /// Raw body as text, with invalid UTF-8 replaced
    pub fn raw_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Bad signature, stale timestamp, replayed nonce or unknown key
    pub fn is_auth_error(&self) -> bool {
        self.status_code == StatusCode::UNAUTHORIZED.as_u16()
            || AUTH_ERROR_CODES.contains(&self.error_code.as_str())
    }
}

fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn status_error_code(status_code: u16) -> String {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map(|reason| reason.replace(' ', ""))
        .unwrap_or_else(|| format!("Http{status_code}"))
}

/// Result type alias for Biscoint operations
pub type Result<T> = std::result::Result<T, BiscointError>;
