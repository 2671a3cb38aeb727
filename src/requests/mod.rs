pub mod auth;

pub use auth::{AuthenticateRequest, VerifyRequest};
