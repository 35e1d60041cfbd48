/*
[INPUT]:  Exchange payloads and adapter errors
[OUTPUT]: Pretty JSON for stdout and structured error reports for stderr
[POS]:    Presentation layer - command output
[UPDATE]: When changing what commands print
*/

use anyhow::{Context, Result};
use biscoint_adapter::BiscointError;
use serde::Serialize;
use serde_json::{Value, json};

/// Pretty-printed JSON for any payload
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

/// Error details a script can branch on
pub fn error_report(err: &BiscointError) -> Value {
    let retryable = err.is_retryable();
    match err {
        BiscointError::InvalidInput(message) => json!({
            "kind": "InvalidInput",
            "message": message,
            "retryable": retryable,
        }),
        BiscointError::Transport(transport) => json!({
            "kind": "Transport",
            "transportKind": transport.kind.to_string(),
            "message": transport.message,
            "retryable": retryable,
        }),
        BiscointError::Api(api) => json!({
            "kind": "ApiError",
            "statusCode": api.status_code,
            "errorCode": api.error_code,
            "message": api.message,
            "retryable": retryable,
        }),
        BiscointError::Decode(message) => json!({
            "kind": "Decode",
            "message": message,
            "retryable": retryable,
        }),
    }
}
