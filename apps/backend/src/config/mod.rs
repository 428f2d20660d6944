pub mod app;
pub mod db;
pub mod signing_keys;

pub use app::{AppConfig, UsersStore};
pub use db::{db_url, DbOwner, DbProfile};
