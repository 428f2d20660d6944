use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};

use crate::auth::claims::{Claims, DisplayClaims};
use crate::auth::errors::AuthError;
use crate::state::security_config::SecurityConfig;

/// Signature algorithms a token header may declare. Anything else is
/// rejected before the key is touched; the configured algorithm is then
/// pinned exactly during verification.
pub const ACCEPTED_ALGORITHMS: &[Algorithm] = &[Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Issues and verifies RS256 access tokens against one shared keypair.
#[derive(Debug, Clone)]
pub struct TokenService {
    security: Arc<SecurityConfig>,
}

impl TokenService {
    pub fn new(security: Arc<SecurityConfig>) -> Self {
        Self { security }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Mint a token for `subject` valid for the configured TTL from now.
    pub fn issue(&self, subject: &str, display: &DisplayClaims) -> Result<String, AuthError> {
        self.issue_at(subject, display, SystemTime::now())
    }

    /// Mint a token as if issued at `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        display: &DisplayClaims,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidClaims("subject must not be empty".to_string()));
        }

        let iat = unix_seconds(now).map_err(AuthError::SigningFailure)?;
        let exp = iat + self.security.token_ttl.as_secs() as i64;

        let claims = Claims {
            sub: subject.to_string(),
            iss: self.security.issuer.clone(),
            aud: self.security.audiences.clone(),
            iat,
            exp,
            username: display.username.clone(),
            email: display.email.clone(),
        };

        encode(
            &Header::new(self.security.algorithm),
            &claims,
            self.security.encoding_key(),
        )
        .map_err(|e| AuthError::SigningFailure(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify signature, issuer, audience and expiry as of `now`.
    ///
    /// A token is valid up to and including its `exp` second.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::BadSignature);
        }

        let claims = decode::<Claims>(token, self.security.decoding_key(), &self.validation())
            .map(|data| data.claims)
            .map_err(map_jwt_error)?;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidClaims("missing subject".to_string()));
        }
        if claims.exp <= claims.iat {
            return Err(AuthError::InvalidClaims("exp must be after iat".to_string()));
        }

        let now = unix_seconds(now).map_err(AuthError::MalformedToken)?;
        if now > claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        // Pin the algorithm; expiry is checked against the caller's clock above.
        let mut validation = Validation::new(self.security.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[self.security.issuer.as_str()]);
        if self.security.audiences.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(&self.security.audiences);
        }
        validation
    }
}

fn unix_seconds(at: SystemTime) -> Result<i64, String> {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| "clock is before the unix epoch".to_string())
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::InvalidClaims(format!("missing required claim: {claim}"))
        }
        ErrorKind::InvalidIssuer => AuthError::InvalidClaims("issuer mismatch".to_string()),
        ErrorKind::InvalidAudience => AuthError::InvalidClaims("audience mismatch".to_string()),
        ErrorKind::InvalidSubject | ErrorKind::ImmatureSignature => {
            AuthError::InvalidClaims(e.to_string())
        }
        _ => AuthError::MalformedToken(e.to_string()),
    }
}
