//! bcrypt hashing and constant-time verification of user passwords.

use crate::auth::errors::AuthError;

/// bcrypt only reads the first 72 bytes of its input. Longer passwords are
/// refused rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

// Compared against for unknown accounts so a miss costs as much as a hit.
const DUMMY_PASSWORD: &str = "identity-dummy-password";

/// Hashes new passwords and checks candidates against stored digests.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    cost: u32,
    dummy_digest: String,
}

impl CredentialVerifier {
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::HashingFailure(format!(
                "bcrypt cost {cost} outside {MIN_COST}..={MAX_COST}"
            )));
        }
        let dummy_digest = bcrypt::hash(DUMMY_PASSWORD, cost)
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?;
        Ok(Self { cost, dummy_digest })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted bcrypt digest. Two calls with the same input yield
    /// different digests.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::HashingFailure(format!(
                "password exceeds {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::HashingFailure(e.to_string()))
    }

    /// True only when `candidate` matches `digest`. A digest that cannot be
    /// parsed is a mismatch, never an error.
    pub fn verify(&self, digest: &str, candidate: &str) -> bool {
        if candidate.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(candidate, digest).unwrap_or(false)
    }

    /// Burn one verification's worth of work for an account that does not exist.
    pub fn verify_dummy(&self, candidate: &str) -> bool {
        let _ = self.verify(&self.dummy_digest, candidate);
        false
    }
}
