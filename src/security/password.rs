use argon2::{
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::config::auth::AuthConfig;

type HashResult<T> = Result<T, argon2::password_hash::Error>;

/// Outcome of checking a long-term password against its stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Rejected,
    Accepted,
    /// Accepted, but the hash was made with other parameters than the current ones
    AcceptedStale,
}

impl Verification {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Verification::Rejected)
    }
}

/// Argon2id hasher for long-term passwords
///
/// Hashes are PHC strings carrying their own salt and parameters, so a hash
/// made under older settings still verifies and is reported as stale.
///
/// # Example
/// ```no_run
/// use grid_auth::config::AuthConfig;
/// use grid_auth::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&AuthConfig::default()).unwrap();
///
/// let hash = hasher.hash("apass").unwrap();
/// assert!(hasher.verify("apass", &hash).unwrap());
/// ```
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Fails when the `auth.argon2` parameters are out of Argon2's range
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> HashResult<Self> {
        let argon2 = &config.argon2;
        let params = Params::new(
            argon2.memory_cost,
            argon2.time_cost,
            argon2.parallelism,
            Some(argon2.hash_length as usize),
        )?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> HashResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Verify and report whether the stored hash should be replaced
    ///
    /// A malformed hash is an error, a wrong password is `Rejected`.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn check(&self, password: &str, hash: &str) -> HashResult<Verification> {
        let parsed = PasswordHash::new(hash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) if self.is_stale(&parsed) => Ok(Verification::AcceptedStale),
            Ok(()) => Ok(Verification::Accepted),
            Err(argon2::password_hash::Error::Password) => Ok(Verification::Rejected),
            Err(e) => Err(e),
        }
    }

    pub fn verify(&self, password: &str, hash: &str) -> HashResult<bool> {
        Ok(self.check(password, hash)?.is_accepted())
    }

    pub fn needs_rehash(&self, hash: &str) -> HashResult<bool> {
        Ok(self.is_stale(&PasswordHash::new(hash)?))
    }

    fn is_stale(&self, parsed: &PasswordHash<'_>) -> bool {
        if parsed.algorithm.as_str() != "argon2id" {
            return true;
        }

        let current = self.argon2.params();
        let param = |name: &str| parsed.params.get_decimal(name).unwrap_or(0);

        param("m") != current.m_cost() || param("t") != current.t_cost() || param("p") != current.p_cost()
    }
}
