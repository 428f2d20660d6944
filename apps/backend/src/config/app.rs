//! Process-level settings loaded from environment variables at startup.

use std::env;

use crate::auth::password::{MAX_COST, MIN_COST};
use crate::error::AppError;

/// bcrypt's own default work factor.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Backing store for user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsersStore {
    Postgres,
    /// Process-local map; records vanish on restart
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub users_store: UsersStore,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => parse_bcrypt_cost(&raw)?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        let users_store = match env::var("USERS_STORE").as_deref() {
            Ok("memory") => UsersStore::Memory,
            Ok("postgres") | Err(_) => UsersStore::Postgres,
            Ok(other) => {
                return Err(AppError::config(format!(
                    "USERS_STORE must be 'postgres' or 'memory', got '{other}'"
                )))
            }
        };

        Ok(Self {
            host,
            port,
            bcrypt_cost,
            users_store,
        })
    }
}

fn parse_bcrypt_cost(raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|cost| (MIN_COST..=MAX_COST).contains(cost))
        .ok_or_else(|| {
            AppError::config(format!(
                "BCRYPT_COST must be an integer in {MIN_COST}..={MAX_COST}, got '{raw}'"
            ))
        })
}
