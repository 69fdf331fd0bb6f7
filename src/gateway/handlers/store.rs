//! Store handlers: catalog listing and redemption

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::helpers::{ErrorResponse, claims_account_id, ledger_error_response};
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};
use crate::ledger::{self, RedeemReceipt};
use crate::store::{ItemRepository, StoreItem};
use crate::user_auth::Claims;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
    pub item_id: i64,
}

/// List the store catalog
///
/// GET /api/v1/store/items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<StoreItem>>>, ErrorResponse> {
    let items = ItemRepository::list(state.db.pool()).await.map_err(|e| {
        tracing::error!("Catalog query failed: {:?}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::<()>::error(
                error_codes::SERVICE_UNAVAILABLE,
                "Storage unavailable, try again",
            )),
        )
    })?;

    Ok(Json(ApiResponse::success(items)))
}

/// Item detail snapshot. Display only; price and stock are re-validated
/// under lock when the redemption runs.
///
/// GET /api/v1/store/items/{item_id}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(item_id): axum::extract::Path<i64>,
) -> Result<Json<ApiResponse<StoreItem>>, ErrorResponse> {
    let item = ItemRepository::get_by_id(state.db.pool(), item_id)
        .await
        .map_err(|e| {
            tracing::error!("Item query failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Storage unavailable, try again",
                )),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::NOT_FOUND,
                "Item not found",
            )),
        ))?;

    Ok(Json(ApiResponse::success(item)))
}

/// Redeem a store item against the caller's balance
///
/// POST /api/v1/store/redeem
#[utoipa::path(
    post,
    path = "/api/v1/store/redeem",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Redemption committed", body = ApiResponse<RedeemReceipt>),
        (status = 400, description = "Insufficient balance"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Out of stock"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Store"
)]
pub async fn redeem_item(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(req): Json<RedeemRequest>,
) -> Result<Json<ApiResponse<RedeemReceipt>>, ErrorResponse> {
    let account_id = claims_account_id(&claims)?;

    let receipt = ledger::redeem(state.db.pool(), account_id, req.item_id)
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(receipt)))
}
