//! Admin handlers: recharge review queue and resolution

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::helpers::{ErrorResponse, ledger_error_response, parse_amount};
use super::recharge::RechargeView;
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};
use crate::recharge::{Decision, RechargeService};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    /// "approve" or "deny"
    #[schema(example = "approve")]
    pub decision: String,
    /// VTC to credit; required when approving
    #[schema(example = "13.7")]
    pub credited_vtc: Option<String>,
}

/// Pending recharge requests, oldest first
///
/// GET /api/v1/admin/recharges
pub async fn list_pending_recharges(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RechargeView>>>, ErrorResponse> {
    let requests = RechargeService::pending(state.db.pool())
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(
        requests.into_iter().map(RechargeView::from).collect(),
    )))
}

/// Resolve a pending recharge request
///
/// POST /api/v1/admin/recharges/{request_id}/resolve
#[utoipa::path(
    post,
    path = "/api/v1/admin/recharges/{request_id}/resolve",
    params(("request_id" = i64, Path, description = "Recharge request to resolve")),
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Request resolved"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already processed or supply exhausted"),
        (status = 403, description = "Admin role required")
    ),
    tag = "Admin"
)]
pub async fn resolve_recharge(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    let decision = match req.decision.as_str() {
        "approve" => {
            let raw = req.credited_vtc.as_deref().ok_or((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    error_codes::INVALID_PARAMETER,
                    "credited_vtc is required when approving",
                )),
            ))?;
            Decision::Approve {
                credited_vtc: parse_amount(raw)?,
            }
        }
        "deny" => Decision::Deny,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    error_codes::INVALID_PARAMETER,
                    "Decision must be 'approve' or 'deny'",
                )),
            ));
        }
    };

    RechargeService::resolve(state.db.pool(), request_id, decision)
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(())))
}
