//! Viltrum Wallet - service entry point
//!
//! Loads `config/{env}.yaml`, initializes logging, connects the PostgreSQL
//! pool, and serves the HTTP gateway.

use std::sync::Arc;

use viltrum_wallet::config::AppConfig;
use viltrum_wallet::db::Database;
use viltrum_wallet::gateway;
use viltrum_wallet::logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _log_guard = logging::init_logging(&config);
    tracing::info!(
        "Starting Viltrum Wallet {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    let db = match Database::connect(&config.database).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("FATAL: Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db.health_check().await {
        eprintln!("FATAL: Database health check failed: {}", e);
        std::process::exit(1);
    }

    gateway::run_server(&config, db).await;
}
