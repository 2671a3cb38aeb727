//! Explicit TTL requests against the configured `[min, max]` window
//!
//! TTLs are requested in hours, the way a client's `--ttl` flag does.

use chrono::TimeDelta;
use grid_auth::error::{codes, AuthError};
use grid_auth::grid::options;
use grid_auth::testing::setup::{self, Fixture};
use grid_auth::{Clock, Ttl};

const NAMESPACE: &str = "authentication";
const HOUR: u64 = 3600;

async fn set(fixture: &Fixture, option: &str, value: impl ToString) {
    fixture
        .service
        .set_grid_configuration(NAMESPACE, option, &value.to_string())
        .await
        .unwrap();
}

async fn authenticate_hours(fixture: &Fixture, hours: u64) -> Result<(), AuthError> {
    let request = fixture.request().with_ttl(Ttl::from_hours(hours));
    fixture.service.authenticate(request).await.map(|_| ())
}

// =============================================================================
// Default window
// =============================================================================

#[tokio::test]
async fn test_one_hour_with_defaults() {
    let fixture = setup::fixture().await;
    let now = fixture.clock.now();

    let request = fixture.request().with_ttl(Ttl::from_hours(1));
    let authenticated = fixture.service.authenticate(request).await.unwrap();

    assert_eq!(authenticated.expires_at, now + TimeDelta::hours(1));
}

#[tokio::test]
async fn test_default_window_boundaries() {
    let fixture = setup::fixture().await;

    for ttl in [121, 1_209_600] {
        fixture.service.revoke(setup::USER).await.unwrap();
        let request = fixture.request().with_ttl(Ttl::from_secs(ttl));
        assert!(
            fixture.service.authenticate(request).await.is_ok(),
            "TTL {ttl}s should be inside the default window"
        );
    }

    for ttl in [120, 1_209_601] {
        let request = fixture.request().with_ttl(Ttl::from_secs(ttl));
        let err = fixture.service.authenticate(request).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidTtl { .. }), "TTL {ttl}s should be rejected");
    }
}

#[tokio::test]
async fn test_invalid_ttl_reports_limited_password_code() {
    let fixture = setup::fixture().await;

    let err = authenticate_hours(&fixture, 400).await.unwrap_err();

    assert_eq!(err.code(), codes::PAM_AUTH_PASSWORD_INVALID_TTL);
    assert_eq!(
        err.limited_password_failure_message(),
        "rcGetLimitedPassword failed with error [-994000]"
    );
}

// =============================================================================
// Inverted window: max below min rejects every explicit TTL
// =============================================================================

#[tokio::test]
async fn test_inverted_window_rejects_all_explicit_ttls() {
    for base_hours in [2, 336] {
        let fixture = setup::fixture().await;
        let base = base_hours * HOUR;

        set(&fixture, options::PASSWORD_MIN_TIME, base + 10).await;
        set(&fixture, options::PASSWORD_MAX_TIME, base - 10).await;

        for hours in [base_hours - 1, base_hours, base_hours + 1] {
            let result = authenticate_hours(&fixture, hours).await;
            assert!(
                matches!(result, Err(AuthError::InvalidTtl { .. })),
                "{hours}h should be rejected with min={}s max={}s",
                base + 10,
                base - 10
            );
        }
    }
}

#[tokio::test]
async fn test_inverted_window_still_allows_implicit_ttl() {
    let fixture = setup::fixture().await;

    set(&fixture, options::PASSWORD_MIN_TIME, 7210).await;
    set(&fixture, options::PASSWORD_MAX_TIME, 7190).await;

    let authenticated = fixture.service.authenticate(fixture.request()).await.unwrap();
    assert_eq!(
        authenticated.expires_at - authenticated.issued_at,
        TimeDelta::seconds(7210)
    );
}

// =============================================================================
// Raised maximum
// =============================================================================

#[tokio::test]
async fn test_raised_max_time_boundary_is_inclusive() {
    let fixture = setup::fixture().await;
    set(&fixture, options::PASSWORD_MAX_TIME, 338 * HOUR).await;

    assert!(matches!(
        authenticate_hours(&fixture, 339).await,
        Err(AuthError::InvalidTtl { .. })
    ));
    assert!(authenticate_hours(&fixture, 337).await.is_ok());
    assert!(authenticate_hours(&fixture, 338).await.is_ok());
}

#[tokio::test]
async fn test_raised_min_time_rejects_short_ttl() {
    let fixture = setup::fixture().await;
    set(&fixture, options::PASSWORD_MIN_TIME, 2 * HOUR).await;

    assert!(matches!(
        authenticate_hours(&fixture, 1).await,
        Err(AuthError::InvalidTtl { .. })
    ));
    assert!(authenticate_hours(&fixture, 2).await.is_ok());
}
