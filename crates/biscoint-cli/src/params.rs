/*
[INPUT]:  `key=value` strings from the command line
[OUTPUT]: Typed request parameters for raw endpoint calls
[POS]:    Argument layer - raw call parameters
[UPDATE]: When the accepted parameter syntax changes
*/

use anyhow::{Result, bail};
use biscoint_adapter::Params;
use serde_json::Value;

/// Parse one `key=value` pair.
///
/// `true`/`false` become booleans and bare integers become numbers. Anything
/// else, decimals included, stays a string so amounts are signed exactly as typed.
pub fn parse_param(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("parameter `{raw}` must be written as key=value");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("parameter `{raw}` has an empty key");
    }

    let value = match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        v if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) => match v.parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(v.to_string()),
        },
        v => Value::String(v.to_string()),
    };
    Ok((key.to_string(), value))
}

/// Collect pairs, rejecting a key given twice
pub fn parse_params<'a>(raw: impl IntoIterator<Item = &'a str>) -> Result<Params> {
    let mut params = Params::new();
    for item in raw {
        let (key, value) = parse_param(item)?;
        if params.insert(key.clone(), value).is_some() {
            bail!("parameter `{key}` given more than once");
        }
    }
    Ok(params)
}
