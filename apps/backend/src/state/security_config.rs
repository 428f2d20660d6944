use std::fmt;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::auth::errors::AuthError;
use crate::config::signing_keys::{self, KeySource};

/// Lifetime of every issued access token.
pub const TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Issuer used when `ISSUER` is not configured.
pub const DEFAULT_ISSUER: &str = "users-service";

/// Signing material and token policy, loaded once at startup and shared
/// read-only (behind an `Arc`) for the lifetime of the process.
#[derive(Clone)]
pub struct SecurityConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Pinned signature algorithm (RS256)
    pub algorithm: Algorithm,
    pub issuer: String,
    /// Empty means audience is neither set nor checked
    pub audiences: Vec<String>,
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Build from PEM-encoded RSA keys (PKCS#1 or PKCS#8 private key, SPKI or PKCS#1 public key).
    pub fn from_rsa_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        issuer: impl Into<String>,
        audiences: Vec<String>,
    ) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| AuthError::KeyUnavailable(format!("private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| AuthError::KeyUnavailable(format!("public key: {e}")))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
            issuer: issuer.into(),
            audiences,
            token_ttl: TOKEN_TTL,
        })
    }

    /// Load keys and token policy from the process environment.
    ///
    /// `PRIVATE_KEY`/`PUBLIC_KEY` hold base64 PEM; when unset the keys are
    /// read from `PRIVATE_KEY_FILE`/`PUBLIC_KEY_FILE` (default `cert/id_rsa`,
    /// `cert/id_rsa.pub`). `ISSUER` and comma-separated `AUDIENCE` are optional.
    pub fn from_env() -> Result<Self, AuthError> {
        let private_pem = signing_keys::load_pem(&KeySource::PRIVATE)?;
        let public_pem = signing_keys::load_pem(&KeySource::PUBLIC)?;

        let issuer = std::env::var("ISSUER")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string());
        let audiences = signing_keys::parse_audiences(
            std::env::var("AUDIENCE").ok().as_deref().unwrap_or_default(),
        );

        Self::from_rsa_pem(&private_pem, &public_pem, issuer, audiences)
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Keypair from `tests/fixtures`, default issuer, no audience.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_rsa_pem(
            include_bytes!("../../tests/fixtures/primary_rsa.pem"),
            include_bytes!("../../tests/fixtures/primary_rsa.pub.pem"),
            DEFAULT_ISSUER,
            Vec::new(),
        )
        .expect("test fixture keys should parse")
    }
}

// Key material must never reach a log line.
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audiences", &self.audiences)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
