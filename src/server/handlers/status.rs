use axum::extract::{Extension, Json};
use serde_json::Value;

use crate::error::{not_found_error, Error};
use crate::server::DynAPI;

pub async fn status(Extension(api): Extension<DynAPI>) -> Result<Json<Value>, Error> {
    Ok(api.status().await?.into())
}

pub async fn stats(Extension(api): Extension<DynAPI>) -> Result<Json<Value>, Error> {
    Ok(api.stats().await?.into())
}

pub async fn not_found() -> Error {
    not_found_error()
}
