pub mod auth;
pub mod password;
pub mod seed;

pub use auth::{Claims, TokenService};
