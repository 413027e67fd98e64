use axum::body::Bytes;
use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use serde_json::Value;

use super::{parse_path_id, parse_payload};
use crate::entities::Entity;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(city_id): Path<String>,
) -> Result<Json<Vec<Value>>, Error> {
    let places = api.list_places(parse_path_id(&city_id)?).await?;

    Ok(places.iter().map(Entity::to_dict).collect::<Vec<_>>().into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let place = api.find_place(parse_path_id(&place_id)?).await?;

    Ok(place.to_dict().into())
}

/// Answers 200 with the place as it was before deletion.
pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let place = api.delete_place(parse_path_id(&place_id)?).await?;

    Ok(place.to_dict().into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), Error> {
    let place = api
        .create_place(parse_path_id(&city_id)?, parse_payload(&body))
        .await?;

    Ok((StatusCode::CREATED, place.to_dict().into()))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, Error> {
    let place = api
        .update_place(parse_path_id(&place_id)?, parse_payload(&body))
        .await?;

    Ok(place.to_dict().into())
}
