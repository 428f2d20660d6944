//! Identity claims carried inside bearer tokens and the identity the
//! authorization gate hands to handlers.

use serde::{Deserialize, Deserializer, Serialize};

/// Claims included in our backend-issued access tokens.
///
/// Registered claims default when absent so that a missing `sub`/`exp`
/// surfaces as a claims failure rather than a parse failure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Opaque user identifier (users.sub)
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub iss: String,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "one_or_many"
    )]
    pub aud: Vec<String>,
    /// Issued-at (seconds since epoch)
    #[serde(default)]
    pub iat: i64,
    /// Expiry (seconds since epoch)
    #[serde(default)]
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Display attributes copied into a token for client convenience.
/// Never used for authorization decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayClaims {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Identity resolved by the authorization gate, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
}

// `aud` may be serialized as a single string or as an array.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(aud)) => vec![aud],
        Some(OneOrMany::Many(auds)) => auds,
    })
}
