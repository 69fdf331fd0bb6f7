//! Recharge handlers: fiat top-up submission and requester history

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::helpers::{ErrorResponse, claims_account_id, ledger_error_response, parse_amount};
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};
use crate::recharge::{RechargeRequest, RechargeService};
use crate::user_auth::Claims;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRechargeRequest {
    /// Fiat amount, e.g. bolívares
    #[schema(example = "500")]
    pub amount_fiat: String,
    #[schema(example = "bank-transfer")]
    pub method: String,
    #[schema(example = "ref-20260806-0001")]
    pub reference: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitRechargeResponse {
    pub request_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RechargeHistoryQuery {
    pub limit: Option<i64>,
}

/// Serializable view of a recharge request
#[derive(Debug, Serialize, ToSchema)]
pub struct RechargeView {
    pub request_id: i64,
    pub account_id: i64,
    pub amount_fiat: Decimal,
    pub method: String,
    pub reference: String,
    pub credited_vtc: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<RechargeRequest> for RechargeView {
    fn from(r: RechargeRequest) -> Self {
        Self {
            request_id: r.request_id,
            account_id: r.account_id,
            amount_fiat: r.amount_fiat,
            method: r.method,
            reference: r.reference,
            credited_vtc: r.credited_vtc,
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
            resolved_at: r.resolved_at,
        }
    }
}

/// Submit a fiat top-up request for admin review
///
/// POST /api/v1/recharge
pub async fn submit_recharge(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(req): Json<SubmitRechargeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitRechargeResponse>>), ErrorResponse> {
    let account_id = claims_account_id(&claims)?;

    if req.method.trim().is_empty() || req.reference.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "Method and reference are required",
            )),
        ));
    }

    let amount_fiat = parse_amount(&req.amount_fiat)?;

    let request_id = RechargeService::submit(
        state.db.pool(),
        account_id,
        amount_fiat,
        req.method.trim(),
        req.reference.trim(),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SubmitRechargeResponse { request_id })),
    ))
}

/// The caller's own recharge requests, newest first
///
/// GET /api/v1/recharge/history?limit=50
pub async fn get_recharge_history(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Query(query): Query<RechargeHistoryQuery>,
) -> Result<Json<ApiResponse<Vec<RechargeView>>>, ErrorResponse> {
    let account_id = claims_account_id(&claims)?;
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let requests = RechargeService::history_for(state.db.pool(), account_id, limit)
        .await
        .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(
        requests.into_iter().map(RechargeView::from).collect(),
    )))
}
