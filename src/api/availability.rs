//! Availability endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    availability::Availability,
    error::AppResult,
    models::{BibDocument, Holdability, Holding, HomeLibrary},
    repository::CacheOptions,
    AppState,
};

/// Message shown when the ILS has nothing usable for a document
pub const NO_INFORMATION: &str = "No information available";

#[derive(Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub document: BibDocument,
    /// Only show copies with these barcodes
    #[serde(default)]
    pub barcodes: Option<Vec<String>>,
    /// Bypass the cached ILS response
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Bypass the cached ILS response
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Serialize, ToSchema)]
pub struct LibraryCount {
    pub library: String,
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct LostNote {
    pub library: String,
    pub note: String,
}

/// Patron-facing availability of one catalog item
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub key: String,
    pub status: Option<i32>,
    pub holdability: Holdability,
    pub holdable: bool,
    pub holdable_call_numbers: Vec<String>,
    pub leoable: bool,
    pub has_ivy_holdings: bool,
    pub existing_copies: usize,
    pub available_copies: usize,
    pub reserve_copies: usize,
    pub circulating_copies: usize,
    pub special_collections_copies: usize,
    /// Holdings in display order
    pub holdings: Vec<Holding>,
    pub holdings_by_library: Vec<LibraryCount>,
    pub available_by_library: Vec<LibraryCount>,
    /// Lost and missing copies per library
    pub lost: Vec<LostNote>,
    pub summary_libraries: Vec<HomeLibrary>,
}

impl From<&Availability> for AvailabilityResponse {
    fn from(availability: &Availability) -> Self {
        let counts = |map: &IndexMap<String, usize>| -> Vec<LibraryCount> {
            map.iter()
                .map(|(library, count)| LibraryCount {
                    library: library.clone(),
                    count: *count,
                })
                .collect()
        };
        let item = availability.catalog_item();

        Self {
            key: item.key.clone(),
            status: item.status,
            holdability: item.holdability.clone(),
            holdable: availability.is_holdable(),
            holdable_call_numbers: availability
                .holdable_call_numbers()
                .into_iter()
                .map(str::to_string)
                .collect(),
            leoable: availability.is_leoable(),
            has_ivy_holdings: availability.has_ivy_holdings(),
            existing_copies: availability.existing_copies(),
            available_copies: availability.available_copies(),
            reserve_copies: availability.reserve_copies(),
            circulating_copies: availability.circulating_copies(),
            special_collections_copies: availability.special_collections_copies(),
            holdings: availability.holdings().to_vec(),
            holdings_by_library: counts(availability.holdings_by_library()),
            available_by_library: counts(availability.available_by_library()),
            lost: availability
                .lost()
                .iter()
                .map(|(library, note)| LostNote {
                    library: library.clone(),
                    note: note.clone(),
                })
                .collect(),
            summary_libraries: availability.summary_libraries().to_vec(),
        }
    }
}

/// Availability lookup result; `availability` is absent when the ILS had nothing usable
#[derive(Serialize, ToSchema)]
pub struct AvailabilityEnvelope {
    pub document_id: String,
    pub availability: Option<AvailabilityResponse>,
    pub message: Option<String>,
}

impl AvailabilityEnvelope {
    fn new(document_id: String, availability: Option<Availability>) -> Self {
        match availability {
            Some(availability) => Self {
                document_id,
                availability: Some(AvailabilityResponse::from(&availability)),
                message: None,
            },
            None => Self {
                document_id,
                availability: None,
                message: Some(NO_INFORMATION.to_string()),
            },
        }
    }
}

fn cache_options(refresh: bool) -> CacheOptions {
    if refresh {
        CacheOptions::refresh()
    } else {
        CacheOptions::default()
    }
}

/// Resolve availability for a catalog document
#[utoipa::path(
    post,
    path = "/availability",
    tag = "availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability, or a note that none is available", body = AvailabilityEnvelope),
        (status = 404, description = "Document id has no ILS key", body = crate::error::ErrorResponse),
        (status = 503, description = "ILS connection failed, retry", body = crate::error::ErrorResponse)
    )
)]
pub async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<AvailabilityRequest>,
) -> AppResult<Json<AvailabilityEnvelope>> {
    let document_id = request.document.id.clone();
    let availability = state
        .services
        .availability
        .find(request.document, request.barcodes, &cache_options(request.refresh))
        .await?;
    Ok(Json(AvailabilityEnvelope::new(document_id, availability)))
}

/// Availability for a document id, without catalog record details
#[utoipa::path(
    get,
    path = "/items/{id}/availability",
    tag = "availability",
    params(
        ("id" = String, Path, description = "Catalog document id"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability, or a note that none is available", body = AvailabilityEnvelope),
        (status = 404, description = "Document id has no ILS key", body = crate::error::ErrorResponse),
        (status = 503, description = "ILS connection failed, retry", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityEnvelope>> {
    let availability = state
        .services
        .availability
        .find(BibDocument::new(id.clone()), None, &cache_options(query.refresh))
        .await?;
    Ok(Json(AvailabilityEnvelope::new(id, availability)))
}

/// Drop the cached ILS response for a document
#[utoipa::path(
    delete,
    path = "/items/{id}/cache",
    tag = "availability",
    params(
        ("id" = String, Path, description = "Catalog document id")
    ),
    responses(
        (status = 204, description = "Cache entry discarded"),
        (status = 404, description = "Document id has no ILS key", body = crate::error::ErrorResponse)
    )
)]
pub async fn discard_item_cache(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.services.availability.discard(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
