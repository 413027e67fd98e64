use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::entities::{Entity, Payload, CLASS_KEY};
use crate::error::{bad_request_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub city_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable attributes of a place as read from a payload.
///
/// `id`, `city_id`, `user_id`, the timestamps and `__class__` have no field
/// here, so a payload can never overwrite them. Unknown keys are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<i64>,
    pub number_bathrooms: Option<i64>,
    pub max_guest: Option<i64>,
    pub price_by_night: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceChanges {
    pub fn from_payload(payload: &Payload) -> Result<Self, Error> {
        serde_json::from_value(Value::Object(payload.clone()))
            .map_err(|err| bad_request_error(format!("Invalid attribute: {}", err)))
    }
}

impl Place {
    pub fn new(city_id: Uuid, user_id: Uuid, name: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            city_id,
            user_id,
            name,
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies every attribute present in `changes`, keeping the rest.
    pub fn apply(&mut self, changes: PlaceChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(number_rooms) = changes.number_rooms {
            self.number_rooms = number_rooms;
        }
        if let Some(number_bathrooms) = changes.number_bathrooms {
            self.number_bathrooms = number_bathrooms;
        }
        if let Some(max_guest) = changes.max_guest {
            self.max_guest = max_guest;
        }
        if let Some(price_by_night) = changes.price_by_night {
            self.price_by_night = price_by_night;
        }
        if let Some(latitude) = changes.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = changes.longitude {
            self.longitude = longitude;
        }
    }
}

impl Entity for Place {
    const CLASS: &'static str = "Place";
    const TABLE: &'static str = "places";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn to_dict(&self) -> Value {
        json!({
            "id": self.id,
            "city_id": self.city_id,
            "user_id": self.user_id,
            "name": self.name,
            "description": self.description,
            "number_rooms": self.number_rooms,
            "number_bathrooms": self.number_bathrooms,
            "max_guest": self.max_guest,
            "price_by_night": self.price_by_night,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            CLASS_KEY: Self::CLASS,
        })
    }
}
