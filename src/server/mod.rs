mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    handler::Handler,
    routing::{get, post},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{cities, places, status, users};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/api/v1/status", get(status::status))
        .route("/api/v1/stats", get(status::stats))
        .route("/api/v1/cities", post(cities::create))
        .route("/api/v1/cities/:city_id", get(cities::find))
        .route(
            "/api/v1/cities/:city_id/places",
            get(places::list).post(places::create),
        )
        .route(
            "/api/v1/places/:place_id",
            get(places::find)
                .put(places::update)
                .delete(places::delete),
        )
        .route("/api/v1/users", post(users::create))
        .route("/api/v1/users/:user_id", get(users::find))
        .fallback(status::not_found.into_service())
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}
