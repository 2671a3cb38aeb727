pub mod auth;

pub use auth::{Authenticated, Verified};
