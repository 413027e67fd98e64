use super::helpers::{require_payload, require_string};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::CityAPI,
    db::Storage,
    entities::{City, Payload},
    error::Error,
};

#[async_trait]
impl<S: Storage> CityAPI for Engine<S> {
    #[tracing::instrument(skip(self))]
    async fn find_city(&self, id: Uuid) -> Result<City, Error> {
        self.fetch(id).await
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create_city(&self, payload: Option<Payload>) -> Result<City, Error> {
        let payload = require_payload(payload)?;
        let name = require_string(&payload, "name", "Missing name")?;

        let city = City::new(name);

        self.store.save(&city).await?;

        tracing::info!(city_id = %city.id, "city created");

        Ok(city)
    }
}
