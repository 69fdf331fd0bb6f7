use std::sync::Arc;

use crate::db::Database;
use crate::user_auth::UserAuthService;

/// Shared gateway state.
///
/// The wallet cannot operate without its store, so the pool is held
/// unconditionally; there is no degraded no-database mode.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, user_auth: Arc<UserAuthService>) -> Self {
        Self { db, user_auth }
    }
}
