use axum::body::Bytes;
use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use serde_json::Value;

use super::{parse_path_id, parse_payload};
use crate::entities::Entity;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), Error> {
    let city = api.create_city(parse_payload(&body)).await?;

    Ok((StatusCode::CREATED, city.to_dict().into()))
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let city = api.find_city(parse_path_id(&city_id)?).await?;

    Ok(city.to_dict().into())
}
