use crate::error::AuthResult;
use crate::grid::options;
use crate::services::AuthService;

impl AuthService {
    /// Store the configured defaults for any policy option not yet present
    ///
    /// Existing values are never overwritten. Returns how many options were
    /// inserted.
    #[::tracing::instrument(skip(self), fields(namespace = %self.config.namespace))]
    pub async fn seed_defaults(&self) -> AuthResult<usize> {
        let namespace = &self.config.namespace;
        let extend = if self.config.password_extend_lifetime { "1" } else { "0" };

        let defaults = [
            (options::PASSWORD_MIN_TIME, self.config.password_min_time.to_string()),
            (options::PASSWORD_MAX_TIME, self.config.password_max_time.to_string()),
            (options::PASSWORD_EXTEND_LIFETIME, extend.to_string()),
        ];

        let mut inserted = 0;
        for (option, value) in defaults {
            if self.grid.seed(namespace, option, &value).await? {
                inserted += 1;
            }
        }

        ::tracing::info!(inserted, "Grid configuration defaults seeded");
        Ok(inserted)
    }
}
