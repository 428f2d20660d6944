//! Startup loading of the RSA signing keypair.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::auth::errors::AuthError;

/// Where one half of the keypair comes from.
#[derive(Debug, Clone, Copy)]
pub struct KeySource {
    /// Base64-encoded PEM in this variable wins when set
    pub env_var: &'static str,
    /// Variable overriding the on-disk fallback path
    pub file_env_var: &'static str,
    pub default_path: &'static str,
}

impl KeySource {
    pub const PRIVATE: KeySource = KeySource {
        env_var: "PRIVATE_KEY",
        file_env_var: "PRIVATE_KEY_FILE",
        default_path: "cert/id_rsa",
    };

    pub const PUBLIC: KeySource = KeySource {
        env_var: "PUBLIC_KEY",
        file_env_var: "PUBLIC_KEY_FILE",
        default_path: "cert/id_rsa.pub",
    };

    fn path(&self) -> PathBuf {
        std::env::var(self.file_env_var)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(self.default_path))
    }
}

/// Resolve PEM bytes for `source`: environment (base64) first, then the key file.
///
/// Errors name the source that failed, never its contents.
pub fn load_pem(source: &KeySource) -> Result<Vec<u8>, AuthError> {
    match std::env::var(source.env_var) {
        Ok(value) if !value.trim().is_empty() => decode_env_value(source.env_var, value.trim()),
        _ => {
            let path = source.path();
            std::fs::read(&path).map_err(|e| {
                AuthError::KeyUnavailable(format!("{}: {e}", path.display()))
            })
        }
    }
}

fn decode_env_value(var: &str, value: &str) -> Result<Vec<u8>, AuthError> {
    // tolerate a raw PEM pasted into the variable
    if value.starts_with("-----BEGIN") {
        return Ok(value.as_bytes().to_vec());
    }
    STANDARD
        .decode(value)
        .map_err(|e| AuthError::KeyUnavailable(format!("{var} is not valid base64: {e}")))
}

/// Split a comma-separated audience list, dropping blank entries.
pub fn parse_audiences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
