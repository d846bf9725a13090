//! Patron account and reference list endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{BibDocument, Checkout, Hold, Library, Location, Reserve, User},
    repository::CacheOptions,
    AppState,
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckedOutQuery {
    /// Call number to check; defaults to the item's only holdable call number
    pub call_number: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CheckedOutResponse {
    pub computing_id: String,
    pub document_id: String,
    pub checked_out: bool,
}

/// Get a patron account
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Computing id")),
    responses(
        (status = 200, description = "Patron account", body = User),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<User>> {
    let user = state.services.accounts.user(&id, &CacheOptions::default()).await?;
    Ok(Json(user))
}

/// List a patron's checkouts
#[utoipa::path(
    get,
    path = "/users/{id}/checkouts",
    tag = "users",
    params(("id" = String, Path, description = "Computing id")),
    responses(
        (status = 200, description = "Checkouts", body = Vec<Checkout>),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_checkouts(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Vec<Checkout>>> {
    let checkouts = state.services.accounts.checkouts(&id, &CacheOptions::default()).await?;
    Ok(Json(checkouts))
}

/// List a patron's holds
#[utoipa::path(
    get,
    path = "/users/{id}/holds",
    tag = "users",
    params(("id" = String, Path, description = "Computing id")),
    responses(
        (status = 200, description = "Holds", body = Vec<Hold>),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_holds(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Vec<Hold>>> {
    let holds = state.services.accounts.holds(&id, &CacheOptions::default()).await?;
    Ok(Json(holds))
}

/// List a patron's course reserves
#[utoipa::path(
    get,
    path = "/users/{id}/reserves",
    tag = "users",
    params(("id" = String, Path, description = "Computing id")),
    responses(
        (status = 200, description = "Reserves", body = Vec<Reserve>),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reserves(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Vec<Reserve>>> {
    let reserves = state.services.accounts.reserves(&id, &CacheOptions::default()).await?;
    Ok(Json(reserves))
}

/// Whether a patron has a catalog document checked out
#[utoipa::path(
    get,
    path = "/users/{id}/checked-out/{document_id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "Computing id"),
        ("document_id" = String, Path, description = "Catalog document id"),
        CheckedOutQuery
    ),
    responses(
        (status = 200, description = "Checkout status", body = CheckedOutResponse),
        (status = 404, description = "Document id has no ILS key", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_checked_out(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(String, String)>,
    Query(query): Query<CheckedOutQuery>,
) -> AppResult<Json<CheckedOutResponse>> {
    let options = CacheOptions::default();
    let availability = state
        .services
        .availability
        .find(BibDocument::new(document_id.clone()), None, &options)
        .await?;

    let checked_out = match availability {
        Some(availability) => {
            let user = state.services.accounts.user_with_checkouts(&id, &options).await?;
            availability.user_has_checked_out(&user, query.call_number.as_deref())
        }
        None => false,
    };

    Ok(Json(CheckedOutResponse {
        computing_id: id,
        document_id,
        checked_out,
    }))
}

/// List ILS libraries
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "lists",
    responses(
        (status = 200, description = "Libraries", body = Vec<Library>),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_libraries(State(state): State<AppState>) -> AppResult<Json<Vec<Library>>> {
    Ok(Json(state.services.accounts.libraries(&CacheOptions::default()).await?))
}

/// List ILS shelving locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "lists",
    responses(
        (status = 200, description = "Locations", body = Vec<Location>),
        (status = 502, description = "ILS failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    Ok(Json(state.services.accounts.locations(&CacheOptions::default()).await?))
}
