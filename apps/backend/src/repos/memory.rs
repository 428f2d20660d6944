//! In-process user store for local runs and tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::users::{NewUser, User, UserRepository};

/// Users keyed by email, with a secondary index from `sub` to email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    by_email: DashMap<String, User>,
    email_by_sub: DashMap<String, String>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.by_email.get(email).map(|user| user.clone()))
    }

    async fn find_by_sub(&self, sub: &str) -> Result<Option<User>, DomainError> {
        let Some(email) = self.email_by_sub.get(sub).map(|email| email.clone()) else {
            return Ok(None);
        };
        self.find_by_email(&email).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.by_email.contains_key(email))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        // The entry guard makes check-and-insert atomic per email
        match self.by_email.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "email already registered",
            )),
            Entry::Vacant(slot) => {
                let sub_slot = match self.email_by_sub.entry(new_user.sub.clone()) {
                    Entry::Occupied(_) => {
                        return Err(DomainError::conflict(
                            ConflictKind::UniqueSubject,
                            "subject already registered",
                        ))
                    }
                    Entry::Vacant(sub_slot) => sub_slot,
                };
                let now = OffsetDateTime::now_utc();
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    sub: new_user.sub,
                    email: new_user.email,
                    username: new_user.username,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    nickname: new_user.nickname,
                    password_hash: new_user.password_hash,
                    created_at: now,
                    updated_at: now,
                };
                sub_slot.insert(user.email.clone());
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}
