#![deny(warnings)]

pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod grid;
pub mod limited;
pub mod metrics;
pub mod policy;
pub mod requests;
pub mod responses;
pub mod security;
pub mod services;

// Testing utilities (always available for integration tests)
pub mod testing;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, AuthConfig};
pub use credentials::{CredentialStore, LocalCredentialStore};
pub use error::{AuthError, AuthResult};
pub use grid::{GridConfiguration, LocalGridConfiguration};
pub use limited::{IssuanceMode, LimitedPassword, LimitedPasswordStore, LocalLimitedPasswordStore};
pub use metrics::AuthMetrics;
pub use policy::{PasswordLifetimePolicy, Ttl};
pub use requests::{AuthenticateRequest, VerifyRequest};
pub use responses::{Authenticated, Verified};
pub use services::AuthService;
