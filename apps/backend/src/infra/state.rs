use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::auth::password::CredentialVerifier;
use crate::config::app::DEFAULT_BCRYPT_COST;
use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::{connect_db, ensure_schema_ready};
use crate::repos::memory::InMemoryUserRepository;
use crate::repos::users::{SeaUserRepository, UserRepository};
use crate::services::users::UserService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum Store {
    Memory,
    Postgres(DbProfile),
    Custom(Arc<dyn UserRepository>),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: SecurityConfig,
    bcrypt_cost: u32,
    store: Store,
}

impl StateBuilder {
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            security,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            store: Store::Memory,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.store = Store::Postgres(profile);
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserRepository>) -> Self {
        self.store = Store::Custom(users);
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let users: Arc<dyn UserRepository> = match self.store {
            Store::Memory => Arc::new(InMemoryUserRepository::new()),
            Store::Custom(users) => users,
            Store::Postgres(profile) => {
                let conn = connect_db(profile, DbOwner::App).await?;
                ensure_schema_ready(&conn).await?;
                Arc::new(SeaUserRepository::new(conn))
            }
        };

        let security = Arc::new(self.security);
        let tokens = TokenService::new(security.clone());
        let passwords = CredentialVerifier::new(self.bcrypt_cost)?;

        Ok(AppState {
            users: UserService::new(users, tokens.clone(), passwords),
            tokens,
            security,
        })
    }
}

pub fn build_state(security: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security)
}
