use crate::error::{AuthError, AuthResult};
use crate::policy::validate_ttl;
use crate::requests::AuthenticateRequest;
use crate::responses::Authenticated;
use crate::services::AuthService;

impl AuthService {
    /// Exchange a long-term password for a limited password
    ///
    /// Verifies the long-term password, checks an explicit TTL against the
    /// current grid window, then issues, reuses, or extends the user's single
    /// limited password row.
    #[::tracing::instrument(skip(self, request), fields(user = %request.user, ttl = ?request.ttl))]
    pub async fn authenticate(&self, request: AuthenticateRequest) -> AuthResult<Authenticated> {
        match self.try_authenticate(request).await {
            Ok(authenticated) => {
                self.metrics.record_attempt("success");
                self.metrics.record_issued(authenticated.mode.as_str());
                Ok(authenticated)
            }
            Err(e) => {
                self.metrics.record_attempt(outcome(&e));
                Err(e)
            }
        }
    }

    async fn try_authenticate(&self, request: AuthenticateRequest) -> AuthResult<Authenticated> {
        if !self.credentials.verify(&request.user, &request.password).await? {
            ::tracing::info!("Long-term password rejected");
            return Err(AuthError::BadCredentials);
        }

        let policy = self.policy().await?;
        let lifetime = validate_ttl(request.ttl, &policy)?;

        let _guard = self.locks.lock(&request.user).await;
        let now = self.clock.now();

        let issuance = self
            .issuer
            .issue(
                &request.user,
                now,
                lifetime,
                request.ttl.is_some(),
                policy.extend_lifetime,
            )
            .await?;

        ::tracing::info!(
            mode = issuance.mode.as_str(),
            expires_at = %issuance.password.expires_at,
            "Authenticated"
        );

        Ok(issuance.into())
    }
}

fn outcome(error: &AuthError) -> &'static str {
    match error {
        AuthError::BadCredentials => "bad_credentials",
        AuthError::InvalidTtl { .. } => "invalid_ttl",
        AuthError::Expired => "expired",
        AuthError::InvalidAuthentication => "invalid_authentication",
        AuthError::ConfigurationNotFound { .. } | AuthError::Store(_) => "error",
    }
}
