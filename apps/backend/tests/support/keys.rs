//! Signing material from `tests/fixtures`.

use std::sync::Arc;

use identity::state::security_config::DEFAULT_ISSUER;
use identity::{SecurityConfig, TokenService};

const PRIMARY_PRIVATE: &[u8] = include_bytes!("../fixtures/primary_rsa.pem");
const PRIMARY_PUBLIC: &[u8] = include_bytes!("../fixtures/primary_rsa.pub.pem");
const OTHER_PRIVATE: &[u8] = include_bytes!("../fixtures/other_rsa.pem");
const OTHER_PUBLIC: &[u8] = include_bytes!("../fixtures/other_rsa.pub.pem");

/// The keypair the test app trusts.
pub fn security_config() -> SecurityConfig {
    SecurityConfig::from_rsa_pem(PRIMARY_PRIVATE, PRIMARY_PUBLIC, DEFAULT_ISSUER, Vec::new())
        .expect("primary fixture keys should parse")
}

/// A valid keypair the test app does not trust.
pub fn foreign_security_config() -> SecurityConfig {
    SecurityConfig::from_rsa_pem(OTHER_PRIVATE, OTHER_PUBLIC, DEFAULT_ISSUER, Vec::new())
        .expect("other fixture keys should parse")
}

pub fn tokens() -> TokenService {
    TokenService::new(Arc::new(security_config()))
}

pub fn foreign_tokens() -> TokenService {
    TokenService::new(Arc::new(foreign_security_config()))
}
