use super::helpers::{require_payload, require_string};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    db::Storage,
    entities::{parse_id, City, Entity, Payload, Place, PlaceChanges, User},
    error::{bad_request_error, not_found_error, Error},
};

#[async_trait]
impl<S: Storage> PlaceAPI for Engine<S> {
    #[tracing::instrument(skip(self))]
    async fn list_places(&self, city_id: Uuid) -> Result<Vec<Place>, Error> {
        let city: City = self.fetch(city_id).await?;

        self.store.filter::<Place>("city_id", city.id).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        self.fetch(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_place(&self, id: Uuid) -> Result<Place, Error> {
        let place: Place = self.fetch(id).await?;

        self.store.delete::<Place>(place.id).await?;

        tracing::info!(place_id = %place.id, "place deleted");

        Ok(place)
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create_place(&self, city_id: Uuid, payload: Option<Payload>) -> Result<Place, Error> {
        let city: City = self.fetch(city_id).await?;
        let payload = require_payload(payload)?;

        let user_id = payload
            .get("user_id")
            .ok_or_else(|| bad_request_error("Missing user_id"))?
            .as_str()
            .and_then(parse_id)
            .ok_or_else(not_found_error)?;
        let user: User = self.fetch(user_id).await?;

        let name = require_string(&payload, "name", "Missing name")?;

        let mut place = Place::new(city.id, user.id, name);
        place.apply(PlaceChanges::from_payload(&payload)?);

        self.store.save(&place).await?;

        tracing::info!(place_id = %place.id, "place created");

        Ok(place)
    }

    #[tracing::instrument(skip(self, payload))]
    async fn update_place(&self, id: Uuid, payload: Option<Payload>) -> Result<Place, Error> {
        let mut place: Place = self.fetch(id).await?;
        let payload = require_payload(payload)?;

        place.apply(PlaceChanges::from_payload(&payload)?);
        place.touch();

        self.store.save(&place).await?;

        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CityAPI, UserAPI};
    use crate::db::MemoryStore;
    use serde_json::{json, Value};
    use tokio_test::block_on;

    fn payload(value: Value) -> Option<Payload> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn seeded() -> (Engine<MemoryStore>, City, User) {
        let engine = Engine::new(MemoryStore::new());
        let city = block_on(engine.create_city(payload(json!({ "name": "Lagos" })))).unwrap();
        let user = block_on(engine.create_user(payload(json!({ "email": "ada@example.com" })))).unwrap();

        (engine, city, user)
    }

    fn create(engine: &Engine<MemoryStore>, city: &City, user: &User, name: &str) -> Place {
        block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": user.id.to_string(), "name": name })),
        ))
        .unwrap()
    }

    #[test]
    fn list_places_of_missing_city() {
        let (engine, _, _) = seeded();

        let err = block_on(engine.list_places(Uuid::new_v4())).unwrap_err();
        assert!(err.is_not_found_error());
    }

    #[test]
    fn list_places_returns_only_the_city_places() {
        let (engine, city, user) = seeded();
        let other = block_on(engine.create_city(payload(json!({ "name": "Accra" })))).unwrap();

        let first = create(&engine, &city, &user, "First");
        create(&engine, &other, &user, "Elsewhere");
        let second = create(&engine, &city, &user, "Second");

        let places = block_on(engine.list_places(city.id)).unwrap();
        let ids: Vec<Uuid> = places.iter().map(|place| place.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let empty = block_on(engine.create_city(payload(json!({ "name": "Kano" })))).unwrap();
        assert!(block_on(engine.list_places(empty.id)).unwrap().is_empty());
    }

    #[test]
    fn create_place_merges_body_attributes() {
        let (engine, city, user) = seeded();

        let place = block_on(engine.create_place(
            city.id,
            payload(json!({
                "user_id": user.id.to_string(),
                "name": "Lovely loft",
                "description": "Near the lagoon",
                "max_guest": 3,
                "latitude": 6.45,
                "city_id": Uuid::new_v4().to_string(),
            })),
        ))
        .unwrap();

        assert_eq!(place.city_id, city.id);
        assert_eq!(place.user_id, user.id);
        assert_eq!(place.name, "Lovely loft");
        assert_eq!(place.description, "Near the lagoon");
        assert_eq!(place.max_guest, 3);
        assert_eq!(place.latitude, 6.45);

        let stored = block_on(engine.find_place(place.id)).unwrap();
        assert_eq!(stored.name, "Lovely loft");
    }

    #[test]
    fn create_place_checks_in_order() {
        let (engine, city, user) = seeded();

        // missing city wins over a missing body
        let err = block_on(engine.create_place(Uuid::new_v4(), None)).unwrap_err();
        assert!(err.is_not_found_error());

        let err = block_on(engine.create_place(city.id, None)).unwrap_err();
        assert_eq!(err, bad_request_error("Not a JSON"));

        let err = block_on(engine.create_place(city.id, payload(json!({ "name": "Loft" }))))
            .unwrap_err();
        assert_eq!(err, bad_request_error("Missing user_id"));

        let err = block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": Uuid::new_v4().to_string() })),
        ))
        .unwrap_err();
        assert!(err.is_not_found_error());

        let err = block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": "not-a-uuid", "name": "Loft" })),
        ))
        .unwrap_err();
        assert!(err.is_not_found_error());

        let err = block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": user.id.to_string() })),
        ))
        .unwrap_err();
        assert_eq!(err, bad_request_error("Missing name"));

        assert!(block_on(engine.list_places(city.id)).unwrap().is_empty());
    }

    #[test]
    fn create_place_name_must_be_a_string() {
        let (engine, city, user) = seeded();

        let err = block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": user.id.to_string(), "name": 5 })),
        ))
        .unwrap_err();
        assert_eq!(err, bad_request_error("Missing name"));

        let err = block_on(engine.create_place(
            city.id,
            payload(json!({ "user_id": user.id.to_string(), "name": null })),
        ))
        .unwrap_err();
        assert_eq!(err, bad_request_error("Missing name"));

        assert!(block_on(engine.list_places(city.id)).unwrap().is_empty());
    }

    #[test]
    fn update_place_protects_immutable_fields() {
        let (engine, city, user) = seeded();
        let place = create(&engine, &city, &user, "Old name");

        let updated = block_on(engine.update_place(
            place.id,
            payload(json!({
                "id": "forged-id",
                "user_id": Uuid::new_v4().to_string(),
                "city_id": Uuid::new_v4().to_string(),
                "created_at": "1970-01-01T00:00:00Z",
                "__class__": "User",
                "name": "New name",
                "sauna": true,
            })),
        ))
        .unwrap();

        assert_eq!(updated.id, place.id);
        assert_eq!(updated.user_id, user.id);
        assert_eq!(updated.city_id, city.id);
        assert_eq!(updated.created_at, place.created_at);
        assert_eq!(updated.name, "New name");
        assert!(updated.updated_at >= place.updated_at);

        let stored = block_on(engine.find_place(place.id)).unwrap();
        assert_eq!(stored.name, "New name");
    }

    #[test]
    fn update_place_keeps_absent_attributes() {
        let (engine, city, user) = seeded();
        let place = create(&engine, &city, &user, "Loft");

        let updated = block_on(engine.update_place(
            place.id,
            payload(json!({ "price_by_night": 80 })),
        ))
        .unwrap();

        assert_eq!(updated.name, "Loft");
        assert_eq!(updated.price_by_night, 80);
    }

    #[test]
    fn update_place_failures() {
        let (engine, city, user) = seeded();
        let place = create(&engine, &city, &user, "Loft");

        let err = block_on(engine.update_place(Uuid::new_v4(), payload(json!({ "name": "x" }))))
            .unwrap_err();
        assert!(err.is_not_found_error());

        let err = block_on(engine.update_place(place.id, None)).unwrap_err();
        assert_eq!(err, bad_request_error("Not a JSON"));
    }

    #[test]
    fn delete_place_returns_the_deleted_place() {
        let (engine, city, user) = seeded();
        let place = create(&engine, &city, &user, "Loft");

        let deleted = block_on(engine.delete_place(place.id)).unwrap();
        assert_eq!(deleted.id, place.id);
        assert_eq!(deleted.name, "Loft");

        let err = block_on(engine.find_place(place.id)).unwrap_err();
        assert!(err.is_not_found_error());

        let err = block_on(engine.delete_place(place.id)).unwrap_err();
        assert!(err.is_not_found_error());
    }
}
