//! Supply handler: read-only circulating-supply query

use axum::{Json, extract::State};
use std::sync::Arc;

use super::helpers::{ErrorResponse, ledger_error_response};
use crate::gateway::{state::AppState, types::ApiResponse};
use crate::supply::{self, SupplyInfo};

/// Current supply figures
///
/// GET /api/v1/supply
#[utoipa::path(
    get,
    path = "/api/v1/supply",
    responses(
        (status = 200, description = "Supply figures", body = ApiResponse<SupplyInfo>)
    ),
    tag = "System"
)]
pub async fn get_supply(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SupplyInfo>>, ErrorResponse> {
    let info = supply::info(state.db.pool())
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(info)))
}
