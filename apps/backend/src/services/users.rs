//! Registration, login and profile lookup.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::claims::DisplayClaims;
use crate::auth::jwt::TokenService;
use crate::auth::password::{CredentialVerifier, MAX_PASSWORD_BYTES};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::redaction::RedactedJson;
use crate::logging::security;
use crate::repos::users::{NewUser, User, UserRepository};

static EMAIL_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user record. The password digest is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub href: String,
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<User> for Profile {
    type Error = AppError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let format = |at: time::OffsetDateTime| {
            at.format(&Rfc3339)
                .map_err(|e| AppError::internal(format!("timestamp formatting failed: {e}")))
        };
        Ok(Self {
            href: format!("/users/{}", user.sub),
            created_at: format(user.created_at)?,
            updated_at: format(user.updated_at)?,
            id: user.sub,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
        })
    }
}

/// Lowercased, trimmed form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SYNTAX.is_match(email)
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    passwords: CredentialVerifier,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        passwords: CredentialVerifier,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Create an account and return its subject.
    pub async fn register(&self, req: RegisterRequest) -> Result<String, AppError> {
        debug!(request = %RedactedJson(&req), "register requested");

        let email = normalize_email(&req.email);
        if !is_valid_email(&email) {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "A valid email address is required",
            ));
        }
        if req.password.is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "Password is required",
            ));
        }
        if req.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
            ));
        }

        if self.users.email_exists(&email).await? {
            debug!(email = %Redacted(&email), "email already registered");
            return Err(AppError::conflict(
                ErrorCode::UserAlreadyExists,
                "A user with this email already exists",
            ));
        }

        let passwords = self.passwords.clone();
        let password = req.password;
        let password_hash = run_blocking(move || passwords.hash(&password)).await??;

        let user = self
            .users
            .create(NewUser {
                sub: Uuid::new_v4().to_string(),
                email,
                password_hash,
                username: non_blank(req.username),
                first_name: non_blank(req.first_name),
                last_name: non_blank(req.last_name),
                nickname: non_blank(req.nickname),
            })
            .await?;

        info!(user_id = user.id, sub = %user.sub, "user registered");
        Ok(user.sub)
    }

    /// Check credentials and mint an access token.
    ///
    /// Unknown email and wrong password produce the same error after the
    /// same amount of hashing work.
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        debug!(request = %RedactedJson(&req), "login requested");

        let email = normalize_email(&req.email);
        let user = self.users.find_by_email(&email).await?;

        let passwords = self.passwords.clone();
        let candidate = req.password;
        let Some(user) = user else {
            run_blocking(move || passwords.verify_dummy(&candidate)).await?;
            security::login_failed("unknown_email", Some(&email));
            return Err(AppError::invalid_credentials());
        };

        let digest = user.password_hash.clone();
        let matched = run_blocking(move || passwords.verify(&digest, &candidate)).await?;
        if !matched {
            security::login_failed("wrong_password", Some(&email));
            return Err(AppError::invalid_credentials());
        }

        let display = DisplayClaims {
            username: user.username.clone(),
            email: Some(user.email.clone()),
        };
        let token = self.tokens.issue(&user.sub, &display)?;

        info!(user_id = user.id, sub = %user.sub, "login succeeded");
        Ok(token)
    }

    /// Profile of the user identified by `sub`.
    pub async fn get_profile(&self, sub: &str) -> Result<Profile, AppError> {
        let user = self
            .users
            .find_by_sub(sub)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;

        let profile = Profile::try_from(user)?;
        debug!(profile = %RedactedJson(&profile), "profile loaded");
        Ok(profile)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// bcrypt is deliberately slow; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("blocking task failed: {e}")))
}
