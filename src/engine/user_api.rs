use super::helpers::{optional_string, require_payload, require_string};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::UserAPI,
    db::Storage,
    entities::{Payload, User},
    error::Error,
};

#[async_trait]
impl<S: Storage> UserAPI for Engine<S> {
    #[tracing::instrument(skip(self))]
    async fn find_user(&self, id: Uuid) -> Result<User, Error> {
        self.fetch(id).await
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create_user(&self, payload: Option<Payload>) -> Result<User, Error> {
        let payload = require_payload(payload)?;
        let email = require_string(&payload, "email", "Missing email")?;

        let user = User::new(
            email,
            optional_string(&payload, "first_name"),
            optional_string(&payload, "last_name"),
        );

        self.store.save(&user).await?;

        tracing::info!(user_id = %user.id, "user created");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::bad_request_error;
    use serde_json::json;
    use tokio_test::block_on;

    #[test]
    fn create_user_with_optional_names() {
        let engine = Engine::new(MemoryStore::new());

        let user = block_on(engine.create_user(
            json!({ "email": "ada@example.com", "first_name": "Ada" })
                .as_object()
                .cloned(),
        ))
        .unwrap();

        let found = block_on(engine.find_user(user.id)).unwrap();
        assert_eq!(found.email, "ada@example.com");
        assert_eq!(found.first_name, "Ada");
        assert_eq!(found.last_name, "");
    }

    #[test]
    fn create_user_requires_an_email() {
        let engine = Engine::new(MemoryStore::new());

        let err = block_on(engine.create_user(json!({ "first_name": "Ada" }).as_object().cloned()))
            .unwrap_err();
        assert_eq!(err, bad_request_error("Missing email"));
    }
}
