pub mod claims;
pub mod errors;
pub mod jwt;
pub mod password;

pub use claims::{AuthenticatedUser, Claims, DisplayClaims};
pub use errors::AuthError;
pub use jwt::TokenService;
pub use password::CredentialVerifier;
