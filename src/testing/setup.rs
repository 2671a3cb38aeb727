use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::clock::ManualClock;
use crate::config::auth::{Argon2Config, AuthConfig};
use crate::credentials::LocalCredentialStore;
use crate::grid::LocalGridConfiguration;
use crate::limited::LocalLimitedPasswordStore;
use crate::requests::AuthenticateRequest;
use crate::security::password::PasswordHasher;
use crate::services::AuthService;

/// User every fixture registers
pub const USER: &str = "alice";

/// Long-term password of [`USER`]
pub const PASSWORD: &str = "apass";

/// Default policy settings with fast Argon2 parameters
///
/// # Test Parameters
/// - memory_cost: 19456 KB (19 MB instead of 64 MB)
/// - time_cost: 1 iteration (instead of 3)
/// - parallelism: 1 thread (instead of 4)
/// - hash_length: 32 bytes (same as production)
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        argon2: Argon2Config {
            memory_cost: 19456,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        },
        ..AuthConfig::default()
    }
}

/// Returns a PasswordHasher configured with fast parameters for testing
///
/// # Example
/// ```no_run
/// use grid_auth::testing::setup;
///
/// let hasher = setup::password_hasher().unwrap();
/// let hash = hasher.hash("password").unwrap();
/// assert!(hasher.verify("password", &hash).unwrap());
/// ```
pub fn password_hasher() -> Result<PasswordHasher, argon2::password_hash::Error> {
    PasswordHasher::from_config(&auth_config())
}

/// Clock pinned to a fixed instant so expiry arithmetic is exact
pub fn manual_clock() -> Arc<ManualClock> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    Arc::new(ManualClock::new(start))
}

/// Everything a test needs to drive [`AuthService`] end to end
pub struct Fixture {
    pub service: AuthService,
    pub clock: Arc<ManualClock>,
    pub credentials: LocalCredentialStore,
    pub grid: LocalGridConfiguration,
}

impl Fixture {
    /// Authentication request for [`USER`] with the right password and no TTL
    pub fn request(&self) -> AuthenticateRequest {
        AuthenticateRequest::new(USER, PASSWORD)
    }
}

/// In-memory service with [`USER`] registered and grid defaults seeded
///
/// # Panics
/// Panics if hashing the fixture password or seeding fails.
///
/// # Example
/// ```no_run
/// use grid_auth::testing::setup;
///
/// #[tokio::test]
/// async fn test_something() {
///     let fixture = setup::fixture().await;
///     let authenticated = fixture.service.authenticate(fixture.request()).await.unwrap();
/// }
/// ```
pub async fn fixture() -> Fixture {
    let fixture = unseeded_fixture();

    fixture
        .service
        .seed_defaults()
        .await
        .expect("Failed to seed grid configuration");

    fixture
}

/// Same as [`fixture`] but with an empty grid configuration
pub fn unseeded_fixture() -> Fixture {
    let hasher = password_hasher().expect("Failed to build password hasher");
    let credentials = LocalCredentialStore::new(hasher);
    credentials
        .add_user(USER, PASSWORD)
        .expect("Failed to register test user");

    let grid = LocalGridConfiguration::with_shard_count(4);
    let clock = manual_clock();

    let service = AuthService::new(
        auth_config(),
        Arc::new(grid.clone()),
        Arc::new(credentials.clone()),
        Arc::new(LocalLimitedPasswordStore::new()),
    )
    .with_clock(clock.clone());

    Fixture {
        service,
        clock,
        credentials,
        grid,
    }
}
