pub mod users;

pub use users::{LoginRequest, Profile, RegisterRequest, UserService};
