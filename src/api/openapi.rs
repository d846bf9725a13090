//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::{accounts, availability, health, requests};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Holdings Engine API",
        version = "1.0.0",
        description = "Holdings and availability resolution over the ILS"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::resolve,
        availability::get_item_availability,
        availability::discard_item_cache,
        // Users
        accounts::get_user,
        accounts::get_checkouts,
        accounts::get_holds,
        accounts::get_reserves,
        accounts::get_checked_out,
        // Lists
        accounts::list_libraries,
        accounts::list_locations,
        // Requests
        requests::place_hold,
        requests::renew,
        requests::renew_all,
    ),
    components(
        schemas(
            // Availability
            availability::AvailabilityRequest,
            availability::AvailabilityEnvelope,
            availability::AvailabilityResponse,
            availability::LibraryCount,
            availability::LostNote,
            crate::models::BibDocument,
            crate::models::Holdability,
            crate::models::Holding,
            crate::models::ItemCopy,
            crate::models::HomeLibrary,
            crate::models::HomeLocation,
            crate::models::Summary,
            crate::models::Library,
            crate::models::Location,
            crate::models::ItemType,
            // Users
            crate::models::User,
            crate::models::Checkout,
            crate::models::Hold,
            crate::models::Reserve,
            crate::models::Course,
            crate::models::CatalogItem,
            accounts::CheckedOutResponse,
            // Requests
            requests::HoldRequest,
            requests::RenewRequest,
            requests::RenewAllRequest,
            requests::RequestResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Holdings and availability"),
        (name = "users", description = "Patron accounts"),
        (name = "lists", description = "ILS reference lists"),
        (name = "requests", description = "Holds and renewals")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
