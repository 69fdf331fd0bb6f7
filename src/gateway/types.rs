//! API response wrapper and error code constants

use serde::Serialize;
use utoipa::ToSchema;

/// Unified response envelope: code 0 means success and `data` is present;
/// any other code carries a caller-renderable message instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const INVALID_RECIPIENT: i32 = 1003;
    pub const OUT_OF_STOCK: i32 = 1004;
    pub const SUPPLY_EXHAUSTED: i32 = 1005;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;
    pub const ALREADY_PROCESSED: i32 = 4002;
    pub const BUSY: i32 = 4291;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let resp = ApiResponse::success(7);
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some(7));
    }

    #[test]
    fn test_error_response_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::NOT_FOUND, "Not found");
        assert_eq!(resp.code, error_codes::NOT_FOUND);
        assert!(resp.data.is_none());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("data"));
    }
}
