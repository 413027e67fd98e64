use serde_json::Value;

use crate::{
    entities::Payload,
    error::{bad_request_error, Error},
};

pub const NOT_A_JSON: &str = "Not a JSON";

pub fn require_payload(payload: Option<Payload>) -> Result<Payload, Error> {
    payload.ok_or_else(|| bad_request_error(NOT_A_JSON))
}

/// Reads a required string attribute, failing with `reason` when it is absent
/// or not a string.
pub fn require_string(payload: &Payload, key: &str, reason: &str) -> Result<String, Error> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| bad_request_error(reason))
}

pub fn optional_string(payload: &Payload, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_default()
}
