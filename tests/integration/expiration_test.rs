//! Lazy expiration detected at verification time

use chrono::TimeDelta;
use grid_auth::error::codes;
use grid_auth::grid::options;
use grid_auth::testing::setup::{self, Fixture};
use grid_auth::{AuthError, Clock, IssuanceMode, Ttl, VerifyRequest};

async fn disable_extension(fixture: &Fixture) {
    fixture
        .service
        .set_grid_configuration("authentication", options::PASSWORD_EXTEND_LIFETIME, "0")
        .await
        .unwrap();
}

async fn short_window(fixture: &Fixture, seconds: u64) {
    fixture
        .service
        .set_grid_configuration("authentication", options::PASSWORD_MIN_TIME, &seconds.to_string())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_first_check_after_expiry_reports_expired() {
    let fixture = setup::fixture().await;
    short_window(&fixture, 4).await;

    let authenticated = fixture.service.authenticate(fixture.request()).await.unwrap();
    fixture.clock.advance_secs(5);

    let err = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, authenticated.secret.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Expired));
    assert_eq!(err.code(), codes::CAT_PASSWORD_EXPIRED);
    assert_eq!(err.request_failure_message(), "CAT_PASSWORD_EXPIRED: failed to perform request");

    let err = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, authenticated.secret))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidAuthentication));
    assert_eq!(err.code(), codes::CAT_INVALID_AUTHENTICATION);
}

#[tokio::test]
async fn test_no_expiry_without_verification() {
    let fixture = setup::fixture().await;
    short_window(&fixture, 4).await;

    fixture.service.authenticate(fixture.request()).await.unwrap();
    fixture.clock.advance_secs(3600);

    let row = fixture
        .service
        .limited_passwords()
        .get(setup::USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.state, grid_auth::policy::LimitedPasswordState::Active);
}

#[tokio::test]
async fn test_reauthentication_after_expiry_issues_fresh_secret() {
    let fixture = setup::fixture().await;
    short_window(&fixture, 4).await;

    let first = fixture.service.authenticate(fixture.request()).await.unwrap();
    fixture.clock.advance_secs(5);
    let _ = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, first.secret.clone()))
        .await;

    let second = fixture.service.authenticate(fixture.request()).await.unwrap();

    assert_eq!(second.mode, IssuanceMode::Fresh);
    assert_ne!(second.secret, first.secret);
    assert!(fixture
        .service
        .verify(VerifyRequest::new(setup::USER, second.secret))
        .await
        .is_ok());

    let old = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, first.secret))
        .await;
    assert!(matches!(old, Err(AuthError::InvalidAuthentication)));
}

#[tokio::test]
async fn test_without_extension_reauthentication_keeps_deadline() {
    let fixture = setup::fixture().await;
    disable_extension(&fixture).await;
    short_window(&fixture, 4).await;

    let first = fixture.service.authenticate(fixture.request()).await.unwrap();
    fixture.clock.advance_secs(3);
    let second = fixture.service.authenticate(fixture.request()).await.unwrap();

    assert_eq!(second.mode, IssuanceMode::Reused);
    assert_eq!(second.secret, first.secret);
    assert_eq!(second.expires_at, first.expires_at);

    fixture.clock.advance_secs(2);
    let result = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, second.secret))
        .await;
    assert!(matches!(result, Err(AuthError::Expired)));
}

#[tokio::test]
async fn test_without_extension_explicit_ttl_supersedes() {
    let fixture = setup::fixture().await;
    disable_extension(&fixture).await;

    let first = fixture.service.authenticate(fixture.request()).await.unwrap();
    let now = fixture.clock.now();

    let request = fixture.request().with_ttl(Ttl::from_hours(1));
    let second = fixture.service.authenticate(request).await.unwrap();

    assert_eq!(second.mode, IssuanceMode::Superseded);
    assert_eq!(second.expires_at, now + TimeDelta::hours(1));

    let stale = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, first.secret))
        .await;
    assert!(matches!(stale, Err(AuthError::InvalidAuthentication)));

    let unknown = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, "made-up"))
        .await;
    assert!(matches!(unknown, Err(AuthError::BadCredentials)));
}

/// Two sessions share an extended secret, then extension is switched off. A
/// third login reuses the secret without moving the deadline, so both holders
/// run out together.
#[tokio::test]
async fn test_disabling_extension_stops_refreshing_shared_secret() {
    let fixture = setup::fixture().await;
    short_window(&fixture, 4).await;

    let session_one = fixture.service.authenticate(fixture.request()).await.unwrap();
    fixture.clock.advance_secs(1);
    let session_two = fixture.service.authenticate(fixture.request()).await.unwrap();

    disable_extension(&fixture).await;
    fixture.clock.advance_secs(1);
    let session_three = fixture.service.authenticate(fixture.request()).await.unwrap();

    assert_eq!(session_one.mode, IssuanceMode::Fresh);
    assert_eq!(session_two.mode, IssuanceMode::Extended);
    assert_eq!(session_three.mode, IssuanceMode::Reused);
    assert_eq!(session_three.secret, session_one.secret);
    assert_eq!(session_three.expires_at, session_two.expires_at);

    // Past the deadline set by the second login
    fixture.clock.advance_secs(4);

    let first = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, session_one.secret))
        .await;
    let second = fixture
        .service
        .verify(VerifyRequest::new(setup::USER, session_two.secret))
        .await;

    assert!(matches!(first, Err(AuthError::Expired)));
    assert!(matches!(second, Err(AuthError::InvalidAuthentication)));
}
