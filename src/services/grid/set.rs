use crate::error::AuthResult;
use crate::services::AuthService;

impl AuthService {
    /// Overwrite a grid configuration value
    ///
    /// No validation happens here. Malformed or inconsistent values are stored
    /// as given and resolved when the next request reads the policy.
    #[::tracing::instrument(skip(self))]
    pub async fn set_grid_configuration(
        &self,
        namespace: &str,
        option: &str,
        value: &str,
    ) -> AuthResult<()> {
        self.grid.set(namespace, option, value).await?;
        Ok(())
    }
}
