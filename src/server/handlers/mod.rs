pub mod cities;
pub mod places;
pub mod status;
pub mod users;

use serde_json::Value;
use uuid::Uuid;

use crate::entities::{parse_id, Payload};
use crate::error::{not_found_error, Error};

/// Reads a request body as a JSON object. Anything else, including an empty
/// object, counts as no payload at all.
pub fn parse_payload(body: &[u8]) -> Option<Payload> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

pub fn parse_path_id(raw: &str) -> Result<Uuid, Error> {
    parse_id(raw).ok_or_else(not_found_error)
}
