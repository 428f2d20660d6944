//! User records and the storage seam the services depend on.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use crate::adapters::users_sea::{self as users_adapter, UserCreate};
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// Opaque identifier carried as the token subject
    pub sub: String,
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub sub: String,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
}

/// Lookups return `Ok(None)` for a missing record; errors are reserved for
/// storage failures. `create` fails with `Conflict(UniqueEmail)` when the
/// email is taken.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_sub(&self, sub: &str) -> Result<Option<User>, DomainError>;
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct SeaUserRepository {
    db: DatabaseConnection,
}

impl SeaUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = users_adapter::find_by_email(&self.db, email).await?;
        Ok(row.map(User::from))
    }

    async fn find_by_sub(&self, sub: &str) -> Result<Option<User>, DomainError> {
        let row = users_adapter::find_by_sub(&self.db, sub).await?;
        Ok(row.map(User::from))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(users_adapter::count_by_email(&self.db, email).await? > 0)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = users_adapter::create_user(&self.db, UserCreate::from(user)).await?;
        Ok(User::from(row))
    }
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            sub: model.sub,
            email: model.email,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            nickname: model.nickname,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<NewUser> for UserCreate {
    fn from(user: NewUser) -> Self {
        Self {
            sub: user.sub,
            email: user.email,
            password_hash: user.password_hash,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
        }
    }
}
