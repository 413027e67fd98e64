use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::entities::{City, Payload, Place, User};
use crate::error::Error;

/// Operations on places. A `None` payload means the request body was not a
/// JSON object.
#[async_trait]
pub trait PlaceAPI {
    async fn list_places(&self, city_id: Uuid) -> Result<Vec<Place>, Error>;
    async fn find_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn delete_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn create_place(&self, city_id: Uuid, payload: Option<Payload>) -> Result<Place, Error>;
    async fn update_place(&self, id: Uuid, payload: Option<Payload>) -> Result<Place, Error>;
}

#[async_trait]
pub trait CityAPI {
    async fn find_city(&self, id: Uuid) -> Result<City, Error>;
    async fn create_city(&self, payload: Option<Payload>) -> Result<City, Error>;
}

#[async_trait]
pub trait UserAPI {
    async fn find_user(&self, id: Uuid) -> Result<User, Error>;
    async fn create_user(&self, payload: Option<Payload>) -> Result<User, Error>;
}

#[async_trait]
pub trait StatusAPI {
    async fn status(&self) -> Result<Value, Error>;
    async fn stats(&self) -> Result<Value, Error>;
}

pub trait API: PlaceAPI + CityAPI + UserAPI + StatusAPI {}
