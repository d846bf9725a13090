//! Hold and renewal endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{document::item_key, BibDocument},
    repository::CacheOptions,
    AppState,
};

#[derive(Deserialize, ToSchema)]
pub struct HoldRequest {
    pub computing_id: String,
    /// Catalog document id
    pub document_id: String,
    /// ILS library id to pick the copy up at
    pub pickup_library: String,
    /// Defaults to the item's only holdable call number
    pub call_number: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    pub computing_id: String,
    pub barcode: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RenewAllRequest {
    pub computing_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct RequestResponse {
    pub status: String,
    pub message: String,
}

impl RequestResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }
}

fn required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Place a hold
#[utoipa::path(
    post,
    path = "/requests/hold",
    tag = "requests",
    request_body = HoldRequest,
    responses(
        (status = 200, description = "Hold placed", body = RequestResponse),
        (status = 400, description = "Missing field or ambiguous call number", body = crate::error::ErrorResponse),
        (status = 422, description = "ILS rejected the hold", body = crate::error::ErrorResponse)
    )
)]
pub async fn place_hold(
    State(state): State<AppState>,
    Json(request): Json<HoldRequest>,
) -> AppResult<Json<RequestResponse>> {
    required("computing_id", &request.computing_id)?;
    required("pickup_library", &request.pickup_library)?;
    let catalog_key = item_key(&request.document_id)?;

    let call_number = match request.call_number.filter(|cn| !cn.trim().is_empty()) {
        Some(call_number) => call_number,
        None => {
            let availability = state
                .services
                .availability
                .find(BibDocument::new(request.document_id.clone()), None, &CacheOptions::default())
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No holdings for {}", request.document_id)))?;
            let call_numbers = availability.holdable_call_numbers();
            match call_numbers.as_slice() {
                [only] => only.to_string(),
                _ => return Err(AppError::Validation("call_number is required for this item".to_string())),
            }
        }
    };

    state
        .services
        .requests
        .place_hold(&request.computing_id, &catalog_key, &request.pickup_library, &call_number)
        .await?;
    Ok(Json(RequestResponse::ok(format!("Hold placed on {}", call_number))))
}

/// Renew one checkout
#[utoipa::path(
    post,
    path = "/requests/renew",
    tag = "requests",
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Checkout renewed", body = RequestResponse),
        (status = 422, description = "ILS rejected the renewal", body = crate::error::ErrorResponse)
    )
)]
pub async fn renew(
    State(state): State<AppState>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<RequestResponse>> {
    required("computing_id", &request.computing_id)?;
    required("barcode", &request.barcode)?;
    state
        .services
        .requests
        .renew(&request.computing_id, &request.barcode)
        .await?;
    Ok(Json(RequestResponse::ok(format!("Renewed {}", request.barcode))))
}

/// Renew every checkout
#[utoipa::path(
    post,
    path = "/requests/renew-all",
    tag = "requests",
    request_body = RenewAllRequest,
    responses(
        (status = 200, description = "Checkouts renewed", body = RequestResponse),
        (status = 422, description = "ILS rejected the renewal", body = crate::error::ErrorResponse)
    )
)]
pub async fn renew_all(
    State(state): State<AppState>,
    Json(request): Json<RenewAllRequest>,
) -> AppResult<Json<RequestResponse>> {
    required("computing_id", &request.computing_id)?;
    state.services.requests.renew_all(&request.computing_id).await?;
    Ok(Json(RequestResponse::ok("All checkouts renewed")))
}
