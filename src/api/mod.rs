//! API handlers for the holdings engine REST endpoints

pub mod accounts;
pub mod availability;
pub mod health;
pub mod openapi;
pub mod requests;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Availability
        .route("/availability", post(availability::resolve))
        .route("/items/:id/availability", get(availability::get_item_availability))
        .route("/items/:id/cache", delete(availability::discard_item_cache))
        // Users
        .route("/users/:id", get(accounts::get_user))
        .route("/users/:id/checkouts", get(accounts::get_checkouts))
        .route("/users/:id/holds", get(accounts::get_holds))
        .route("/users/:id/reserves", get(accounts::get_reserves))
        .route("/users/:id/checked-out/:document_id", get(accounts::get_checked_out))
        // Reference lists
        .route("/libraries", get(accounts::list_libraries))
        .route("/locations", get(accounts::list_locations))
        // Requests
        .route("/requests/hold", post(requests::place_hold))
        .route("/requests/renew", post(requests::renew))
        .route("/requests/renew-all", post(requests::renew_all))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
