//! Shared handler helpers: ledger error mapping and claims handling

use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::gateway::types::{ApiResponse, error_codes};
use crate::ledger::LedgerError;
use crate::user_auth::Claims;

pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

/// Map a ledger failure to its HTTP response. Every kind keeps a distinct
/// code and message so the caller can render the exact reason.
pub fn ledger_error_response(e: LedgerError) -> ErrorResponse {
    let (status, code) = match &e {
        LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        LedgerError::InvalidRecipient => (StatusCode::BAD_REQUEST, error_codes::INVALID_RECIPIENT),
        LedgerError::InsufficientBalance => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        LedgerError::OutOfStock => (StatusCode::CONFLICT, error_codes::OUT_OF_STOCK),
        LedgerError::RecipientNotFound
        | LedgerError::UserNotFound
        | LedgerError::ItemNotFound
        | LedgerError::NotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        LedgerError::AlreadyProcessed => (StatusCode::CONFLICT, error_codes::ALREADY_PROCESSED),
        LedgerError::SupplyExhausted => (StatusCode::CONFLICT, error_codes::SUPPLY_EXHAUSTED),
        LedgerError::Busy => (StatusCode::TOO_MANY_REQUESTS, error_codes::BUSY),
        LedgerError::Storage(inner) => {
            tracing::error!("Storage error in ledger operation: {:?}", inner);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Storage unavailable, try again",
                )),
            );
        }
    };

    (status, Json(ApiResponse::<()>::error(code, e.to_string())))
}

/// Resolve the caller's account id from verified claims
pub fn claims_account_id(claims: &Claims) -> Result<i64, ErrorResponse> {
    claims.account_id().ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            error_codes::AUTH_FAILED,
            "Invalid token subject",
        )),
    ))
}

/// Parse a decimal amount from its request-body string form
pub fn parse_amount(raw: &str) -> Result<Decimal, ErrorResponse> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                "Invalid amount",
            )),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_ledger_error_keeps_its_kind() {
        let cases = [
            (
                LedgerError::InsufficientBalance,
                StatusCode::BAD_REQUEST,
                error_codes::INSUFFICIENT_BALANCE,
            ),
            (
                LedgerError::InvalidRecipient,
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_RECIPIENT,
            ),
            (
                LedgerError::OutOfStock,
                StatusCode::CONFLICT,
                error_codes::OUT_OF_STOCK,
            ),
            (
                LedgerError::AlreadyProcessed,
                StatusCode::CONFLICT,
                error_codes::ALREADY_PROCESSED,
            ),
            (
                LedgerError::SupplyExhausted,
                StatusCode::CONFLICT,
                error_codes::SUPPLY_EXHAUSTED,
            ),
            (
                LedgerError::Busy,
                StatusCode::TOO_MANY_REQUESTS,
                error_codes::BUSY,
            ),
            (
                LedgerError::RecipientNotFound,
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, Json(body)) = ledger_error_response(err);
            assert_eq!(got_status, status);
            assert_eq!(body.code, code);
        }
    }

    #[test]
    fn test_storage_error_is_service_unavailable() {
        let (status, Json(body)) = ledger_error_response(LedgerError::Storage(
            sqlx::Error::PoolTimedOut,
        ));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.code, error_codes::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("13.7").unwrap(), Decimal::new(137, 1));
        assert_eq!(parse_amount(" 40 ").unwrap(), Decimal::from(40));
        assert!(parse_amount("not-a-number").is_err());
    }
}
