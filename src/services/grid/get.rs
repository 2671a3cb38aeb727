use crate::error::{AuthError, AuthResult};
use crate::services::AuthService;

impl AuthService {
    /// Read a raw grid configuration value
    #[::tracing::instrument(skip(self))]
    pub async fn get_grid_configuration(&self, namespace: &str, option: &str) -> AuthResult<String> {
        self.grid
            .get(namespace, option)
            .await?
            .ok_or_else(|| AuthError::ConfigurationNotFound {
                namespace: namespace.to_string(),
                option: option.to_string(),
            })
    }
}
