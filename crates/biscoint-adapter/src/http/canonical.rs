/*
[INPUT]:  Request parameters as JSON values
[OUTPUT]: Canonical JSON bodies and query strings shared by signing and transmission
[POS]:    HTTP layer - single serialization routine for signed bytes and wire bytes
[UPDATE]: When the exchange changes its canonical form
*/

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::http::{BiscointError, Result};

/// Request parameters, ordered by key
pub type Params = BTreeMap<String, Value>;

/// Serializes a JSON value with object keys sorted at every depth.
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &Canonical(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Canonical(item))?;
                }
                out.end()
            }
            other => other.serialize(serializer),
        }
    }
}

struct CanonicalParams<'a>(&'a Params);

impl Serialize for CanonicalParams<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            out.serialize_entry(key, &Canonical(value))?;
        }
        out.end()
    }
}

/// Compact JSON with sorted keys and no whitespace.
///
/// This is the byte string that is both signed and sent as a POST body.
pub fn canonical_json(params: &Params) -> Result<String> {
    serde_json::to_string(&CanonicalParams(params))
        .map_err(|e| BiscointError::invalid_input(format!("cannot serialize body: {e}")))
}

/// Query string in canonical key order; booleans become `true`/`false`.
pub fn canonical_query(params: &Params) -> Result<String> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(BiscointError::invalid_input(format!(
                    "parameter `{key}` cannot be sent in a query string"
                )));
            }
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&rendered)
        ));
    }
    Ok(pairs.join("&"))
}

/// Convert a serializable request into parameters, dropping null entries.
pub fn to_params<T: Serialize + ?Sized>(request: &T) -> Result<Params> {
    let value = serde_json::to_value(request)
        .map_err(|e| BiscointError::invalid_input(format!("cannot serialize parameters: {e}")))?;
    match value {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Value::Null => Ok(Params::new()),
        other => Err(BiscointError::invalid_input(format!(
            "parameters must be a JSON object, got {other}"
        ))),
    }
}
