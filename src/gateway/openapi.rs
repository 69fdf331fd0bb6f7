//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::ledger::{RedeemReceipt, TransferReceipt};
use crate::supply::SupplyInfo;

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Viltrum Wallet API",
        version = "1.0.0",
        description = "Custodial VTC wallet: transfers, points store, recharge approval.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::supply::get_supply,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::gateway::handlers::wallet::get_balance,
        crate::gateway::handlers::wallet::create_transfer,
        crate::gateway::handlers::store::redeem_item,
        crate::gateway::handlers::admin::resolve_recharge,
    ),
    components(
        schemas(
            HealthResponse,
            SupplyInfo,
            TransferReceipt,
            RedeemReceipt,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Wallet", description = "Balance, history, transfers (auth required)"),
        (name = "Store", description = "Redeemable-points catalog"),
        (name = "Admin", description = "Recharge review (admin only)"),
        (name = "System", description = "Health and supply queries")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Viltrum Wallet API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_core_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/wallet/transfer"));
        assert!(paths.paths.contains_key("/api/v1/store/redeem"));
        assert!(
            paths
                .paths
                .contains_key("/api/v1/admin/recharges/{request_id}/resolve")
        );
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("jwt_auth"));
    }
}
