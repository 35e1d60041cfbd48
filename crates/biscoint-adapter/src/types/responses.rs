/*
[INPUT]:  Raw JSON response bodies
[OUTPUT]: Payloads extracted from the exchange's response envelope
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the response envelope changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrapper the exchange puts around every success payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub data: Value,
}

/// Payload inside `{"message", "data"}`, or the whole body if it is not wrapped
pub fn into_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_data_unwraps_envelope() {
        let body = json!({"message": "", "data": {"BRL": "1.00"}});
        assert_eq!(into_data(body), json!({"BRL": "1.00"}));
    }

    #[test]
    fn test_into_data_passes_unwrapped_body() {
        let body = json!({"offerId": "X"});
        assert_eq!(into_data(body.clone()), body);
        assert_eq!(into_data(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_envelope_deserialization() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"message":"ok","data":[]}"#).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert_eq!(envelope.data, json!([]));
    }
}
