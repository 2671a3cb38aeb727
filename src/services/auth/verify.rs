use crate::error::{AuthError, AuthResult};
use crate::policy::{expiration, LimitedPasswordState, Verdict};
use crate::requests::VerifyRequest;
use crate::responses::Verified;
use crate::security::secrets_match;
use crate::services::AuthService;

impl AuthService {
    /// Check a limited password presented on a request
    ///
    /// Expiration is detected here and nowhere else. The first check past the
    /// deadline reports [`AuthError::Expired`] and marks the row; every later
    /// check with that secret reports [`AuthError::InvalidAuthentication`], as
    /// does a secret replaced by a later issuance.
    #[::tracing::instrument(skip(self, request), fields(user = %request.user))]
    pub async fn verify(&self, request: VerifyRequest) -> AuthResult<Verified> {
        let result = self.try_verify(request).await;

        let outcome = match &result {
            Ok(_) => "valid",
            Err(AuthError::Expired) => "expired",
            Err(AuthError::InvalidAuthentication) => "invalid_authentication",
            Err(AuthError::BadCredentials) => "bad_credentials",
            Err(_) => "error",
        };
        self.metrics.record_verification(outcome);

        result
    }

    async fn try_verify(&self, request: VerifyRequest) -> AuthResult<Verified> {
        let _guard = self.locks.lock(&request.user).await;
        let store = self.issuer.store();

        let Some(mut row) = store.get(&request.user).await? else {
            ::tracing::info!("No limited password issued for user");
            return Err(AuthError::BadCredentials);
        };

        if !secrets_match(&row.secret, &request.secret) {
            let retired = row
                .retired_secret
                .as_deref()
                .is_some_and(|retired| secrets_match(retired, &request.secret));

            if retired {
                ::tracing::info!("Limited password was replaced");
                return Err(AuthError::InvalidAuthentication);
            }

            ::tracing::info!("Limited password does not match");
            return Err(AuthError::BadCredentials);
        }

        let now = self.clock.now();

        match expiration::evaluate(row.state, now, row.expires_at) {
            Verdict::Valid => Ok(Verified {
                user: row.user,
                expires_at: row.expires_at,
            }),
            Verdict::ExpiredNow => {
                ::tracing::info!(expires_at = %row.expires_at, "Limited password expired");
                row.state = LimitedPasswordState::Expired;
                store.put(row).await?;
                self.metrics.record_expired();
                Err(AuthError::Expired)
            }
            Verdict::AlreadyExpired => {
                ::tracing::info!("Limited password already expired");
                Err(AuthError::InvalidAuthentication)
            }
        }
    }
}
