use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::places;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let place_routes = Router::new()
        .route("/", post(places::create_place))
        .route("/", get(places::list_places))
        .route("/nearby", get(places::nearby))
        .route("/within", get(places::within_viewport))
        .route("/{id}", get(places::get_place))
        .route("/{id}", put(places::update_place))
        .route("/{id}", delete(places::delete_place));

    Router::new()
        .nest("/api/places", place_routes)
        .with_state(state)
}
