//! Wallet handlers: balance, transaction history, peer-to-peer transfer

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
use uuid::Uuid;

use super::helpers::{ErrorResponse, claims_account_id, ledger_error_response, parse_amount};
use crate::account::{AccountRepository, TransactionRepository};
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};
use crate::ledger::{self, TransferReceipt};
use crate::user_auth::Claims;

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub account_id: i64,
    pub balance: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    #[schema(example = "bruno@example.com")]
    pub recipient_email: String,
    #[schema(example = "40")]
    pub amount: String,
    pub memo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionView {
    pub tx_id: i64,
    pub kind: String,
    pub amount: Decimal,
    pub description: String,
    pub transfer_group: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Current balance
///
/// GET /api/v1/wallet/balance
#[utoipa::path(
    get,
    path = "/api/v1/wallet/balance",
    responses(
        (status = 200, description = "Current balance", body = ApiResponse<BalanceResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
) -> Result<Json<ApiResponse<BalanceResponse>>, ErrorResponse> {
    let account_id = claims_account_id(&claims)?;

    let balance = AccountRepository::balance_of(state.db.pool(), account_id)
        .await
        .map_err(|e| {
            tracing::error!("Balance query failed: {:?}", e);
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
                "Account not found",
            )),
        ))?;

    Ok(Json(ApiResponse::success(BalanceResponse {
        account_id,
        balance,
    })))
}

/// Transaction history, newest first
///
/// GET /api/v1/wallet/transactions?limit=50
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<TransactionView>>>, ErrorResponse> {
    let account_id = claims_account_id(&claims)?;
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let records = TransactionRepository::history(state.db.pool(), account_id, limit)
        .await
        .map_err(|e| {
            tracing::error!("History query failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Storage unavailable, try again",
                )),
            )
        })?;

    let views = records
        .into_iter()
        .map(|r| TransactionView {
            tx_id: r.tx_id,
            kind: r.kind.as_str().to_string(),
            amount: r.amount,
            description: r.description,
            transfer_group: r.transfer_group,
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(ApiResponse::success(views)))
}

/// Send VTC to another account
///
/// POST /api/v1/wallet/transfer
#[utoipa::path(
    post,
    path = "/api/v1/wallet/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = ApiResponse<TransferReceipt>),
        (status = 400, description = "Invalid amount, recipient, or insufficient balance"),
        (status = 404, description = "Recipient not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<ApiResponse<TransferReceipt>>, ErrorResponse> {
    let sender_id = claims_account_id(&claims)?;
    let amount = parse_amount(&req.amount)?;

    let receipt = ledger::transfer(
        state.db.pool(),
        sender_id,
        &req.recipient_email,
        amount,
        req.memo.as_deref(),
    )
    .await
    .map_err(ledger_error_response)?;

    Ok(Json(ApiResponse::success(receipt)))
}
