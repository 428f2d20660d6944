pub mod memory;
pub mod users;

pub use memory::InMemoryUserRepository;
pub use users::{NewUser, SeaUserRepository, User, UserRepository};
