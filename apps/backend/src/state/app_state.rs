use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::services::users::UserService;

use super::security_config::SecurityConfig;

/// Shared, read-only application state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    /// Also given to `RequireAuth` when protected scopes are mounted
    pub tokens: TokenService,
    pub security: Arc<SecurityConfig>,
}
