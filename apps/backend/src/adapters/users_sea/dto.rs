//! DTOs for users_sea adapter.

/// DTO for inserting a new user row.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
}
