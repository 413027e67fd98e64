mod city_api;
mod helpers;
mod place_api;
mod status_api;
mod user_api;

use uuid::Uuid;

use crate::{
    api::API,
    db::Storage,
    entities::Entity,
    error::{not_found_error, Error},
};

/// Serves every API operation against a storage handle it owns.
pub struct Engine<S> {
    store: S,
}

impl<S: Storage> Engine<S> {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads an entity or fails with a not found error.
    async fn fetch<T: Entity>(&self, id: Uuid) -> Result<T, Error> {
        self.store.get::<T>(id).await?.ok_or_else(not_found_error)
    }
}

impl<S: Storage> API for Engine<S> {}
