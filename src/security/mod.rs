pub mod password;
pub mod secret;

pub use password::{PasswordHasher, Verification};
pub use secret::{generate_secret, secrets_match};
