#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::{AuthError, AuthenticatedUser, Claims, CredentialVerifier, DisplayClaims, TokenService};
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::CurrentUser;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{CorrelationId, RequestTrace, RequireAuth, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
