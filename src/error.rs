//! Authentication failure taxonomy
//!
//! Every failure the policy core can report to the session layer. Each variant
//! maps onto the numeric code and symbolic name the grid server uses on the wire,
//! so a client can tell an unsatisfiable TTL apart from a wrong password.

use thiserror::Error;

/// Numeric error codes surfaced to clients
pub mod codes {
    pub const SYS_INTERNAL_ERR: i32 = -1;
    pub const CAT_NO_ROWS_FOUND: i32 = -808_000;
    pub const CAT_INVALID_AUTHENTICATION: i32 = -826_000;
    pub const CAT_PASSWORD_EXPIRED: i32 = -840_000;
    pub const PAM_AUTH_PASSWORD_INVALID_TTL: i32 = -994_000;
}

/// Typed failure from an authentication or verification attempt
#[derive(Error, Debug)]
pub enum AuthError {
    /// The long-term password did not match, or the secret was never issued
    #[error("invalid user name or password")]
    BadCredentials,

    /// Explicit TTL outside the effective `[min, max]` window
    #[error("requested TTL of {ttl}s is outside the allowed range [{min}s, {max}s]")]
    InvalidTtl { ttl: u64, min: u64, max: u64 },

    /// First detection of a limited password past its window
    #[error("limited password has expired")]
    Expired,

    /// Secret belongs to a limited password that has already been reported expired
    #[error("limited password is no longer valid")]
    InvalidAuthentication,

    /// Grid configuration option is absent
    #[error("grid configuration [{namespace}] [{option}] not found")]
    ConfigurationNotFound { namespace: String, option: String },

    /// Backing store failure
    #[error("storage failure: {0}")]
    Store(#[from] anyhow::Error),
}

impl AuthError {
    pub fn code(&self) -> i32 {
        match self {
            AuthError::BadCredentials | AuthError::InvalidAuthentication => {
                codes::CAT_INVALID_AUTHENTICATION
            }
            AuthError::InvalidTtl { .. } => codes::PAM_AUTH_PASSWORD_INVALID_TTL,
            AuthError::Expired => codes::CAT_PASSWORD_EXPIRED,
            AuthError::ConfigurationNotFound { .. } => codes::CAT_NO_ROWS_FOUND,
            AuthError::Store(_) => codes::SYS_INTERNAL_ERR,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AuthError::BadCredentials | AuthError::InvalidAuthentication => {
                "CAT_INVALID_AUTHENTICATION"
            }
            AuthError::InvalidTtl { .. } => "PAM_AUTH_PASSWORD_INVALID_TTL",
            AuthError::Expired => "CAT_PASSWORD_EXPIRED",
            AuthError::ConfigurationNotFound { .. } => "CAT_NO_ROWS_FOUND",
            AuthError::Store(_) => "SYS_INTERNAL_ERR",
        }
    }

    /// Message a client prints when a request fails with this error
    pub fn request_failure_message(&self) -> String {
        format!("{}: failed to perform request", self.symbol())
    }

    /// Message a client prints when obtaining a limited password fails
    pub fn limited_password_failure_message(&self) -> String {
        format!("rcGetLimitedPassword failed with error [{}]", self.code())
    }

    /// Whether the failure came from the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::Store(_))
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
