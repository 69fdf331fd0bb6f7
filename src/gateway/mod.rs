pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::db::Database;
use crate::user_auth::UserAuthService;
use crate::user_auth::middleware::{admin_guard, jwt_auth_middleware};
use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(config: &AppConfig, db: Arc<Database>) {
    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        config.jwt_secret.clone(),
    ));

    let state = Arc::new(AppState::new(db, user_auth));

    // Registration and login, no auth required
    let auth_routes = Router::new()
        .route("/register", post(crate::user_auth::handlers::register))
        .route("/login", post(crate::user_auth::handlers::login));

    // Wallet operations, JWT required
    let wallet_routes = Router::new()
        .route("/balance", get(handlers::wallet::get_balance))
        .route("/transactions", get(handlers::wallet::get_transactions))
        .route("/transfer", post(handlers::wallet::create_transfer))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // Catalog is public; redemption needs a caller identity
    let store_routes = Router::new()
        .route("/items", get(handlers::store::list_items))
        .route("/items/{item_id}", get(handlers::store::get_item))
        .merge(
            Router::new()
                .route("/redeem", post(handlers::store::redeem_item))
                .layer(from_fn_with_state(state.clone(), jwt_auth_middleware)),
        );

    let recharge_routes = Router::new()
        .route("/", post(handlers::recharge::submit_recharge))
        .route("/history", get(handlers::recharge::get_recharge_history))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // Admin review queue; jwt middleware runs first, then the role guard
    let admin_routes = Router::new()
        .route("/recharges", get(handlers::admin::list_pending_recharges))
        .route(
            "/recharges/{request_id}/resolve",
            post(handlers::admin::resolve_recharge),
        )
        .layer(axum::middleware::from_fn(admin_guard))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let app = Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/supply", get(handlers::supply::get_supply))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/wallet", wallet_routes)
        .nest("/api/v1/store", store_routes)
        .nest("/api/v1/recharge", recharge_routes)
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.gateway.port, config.gateway.port
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs: http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
