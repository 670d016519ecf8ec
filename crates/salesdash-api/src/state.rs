//! Shared application state

use std::sync::Arc;

use salesdash_auth::AuthService;
use salesdash_db::Database;

/// State shared across all handlers
pub struct AppState {
    /// Database pools and repositories
    pub db: Arc<Database>,
    /// Authentication service
    pub auth: Arc<AuthService>,
    /// Set the Secure attribute on the refresh cookie (off for plain-HTTP dev)
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>, secure_cookies: bool) -> Self {
        Self {
            db,
            auth,
            secure_cookies,
        }
    }
}
