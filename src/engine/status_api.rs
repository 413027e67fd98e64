use super::Engine;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    api::StatusAPI,
    db::Storage,
    entities::{City, Place, User},
    error::Error,
};

#[async_trait]
impl<S: Storage> StatusAPI for Engine<S> {
    async fn status(&self) -> Result<Value, Error> {
        Ok(json!({ "status": "OK" }))
    }

    #[tracing::instrument(skip(self))]
    async fn stats(&self) -> Result<Value, Error> {
        Ok(json!({
            "cities": self.store.count::<City>().await?,
            "places": self.store.count::<Place>().await?,
            "users": self.store.count::<User>().await?,
        }))
    }
}
