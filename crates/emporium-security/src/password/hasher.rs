//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use emporium_config::SecurityConfig;
use emporium_core::{EmporiumError, EmporiumResult, Interface, MessageKey};
use tracing::{debug, warn};

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a password.
    fn hash(&self, password: &str) -> EmporiumResult<String>;

    /// Verifies a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> EmporiumResult<bool>;
}

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }

    /// Creates a password hasher from the configured memory and time cost.
    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        let params = Params::new(
            config.password_memory_kib,
            config.password_iterations,
            1,
            None,
        )
        .unwrap_or_else(|e| {
            warn!("Invalid Argon2 parameters ({}), using defaults", e);
            Params::DEFAULT
        });

        Self::with_params(params)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> EmporiumResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                EmporiumError::internal(
                    MessageKey::InternalError,
                    format!("Failed to hash password: {}", e),
                )
            })?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> EmporiumResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            EmporiumError::internal(
                MessageKey::InternalError,
                format!("Invalid password hash format: {}", e),
            )
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(EmporiumError::internal(
                MessageKey::InternalError,
                format!("Password verification error: {}", e),
            )),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

/// Validates password strength.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<&'static str>> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if password.chars().count() > 128 {
        errors.push("Password must be at most 128 characters long");
    }

    if !password.chars().any(char::is_alphabetic) {
        errors.push("Password must contain at least one letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
