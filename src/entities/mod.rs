mod city;
mod place;
mod user;

pub use city::City;
pub use place::{Place, PlaceChanges};
pub use user::User;

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A parsed JSON request body.
pub type Payload = Map<String, Value>;

/// Key carrying the entity name in every serialized entity.
pub const CLASS_KEY: &str = "__class__";

/// A persisted domain object.
///
/// Storage engines keep the serde form of an entity; `to_dict` is the form
/// handed out over the API, which adds the `__class__` discriminator.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const CLASS: &'static str;
    const TABLE: &'static str;

    fn id(&self) -> Uuid;

    /// Refresh `updated_at` before a save.
    fn touch(&mut self);

    fn to_dict(&self) -> Value;
}

/// Parses an identifier coming from a path or a payload. Anything that is not
/// a UUID can never name a stored entity.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
