use crate::error::AuthResult;
use crate::services::AuthService;

impl AuthService {
    /// Drop a user's limited password, e.g. on logout or user removal
    ///
    /// Returns whether a row existed. Sessions holding the old secret fail with
    /// `BadCredentials` afterwards.
    #[::tracing::instrument(skip(self))]
    pub async fn revoke(&self, user: &str) -> AuthResult<bool> {
        let _guard = self.locks.lock(user).await;

        let removed = self.issuer.store().remove(user).await?;
        if removed {
            ::tracing::info!("Limited password revoked");
        }

        Ok(removed)
    }
}
