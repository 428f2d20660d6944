//! Failure taxonomy for token issuance/verification and credential hashing.

use thiserror::Error;

/// Errors produced by the token service and the credential verifier.
///
/// The four token-validation kinds (`MalformedToken`, `BadSignature`,
/// `Expired`, `InvalidClaims`) are logged with their detail but always
/// reach the client as the same generic unauthorized response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),
    #[error("token signing failed: {0}")]
    SigningFailure(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("bad token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),
    #[error("password hashing failed: {0}")]
    HashingFailure(String),
}

impl AuthError {
    /// True for failures caused by the presented token rather than by the server.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken(_)
                | AuthError::BadSignature
                | AuthError::Expired
                | AuthError::InvalidClaims(_)
        )
    }

    /// Short stable label used in security log events.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::KeyUnavailable(_) => "key_unavailable",
            AuthError::SigningFailure(_) => "signing_failure",
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::HashingFailure(_) => "hashing_failure",
        }
    }
}
