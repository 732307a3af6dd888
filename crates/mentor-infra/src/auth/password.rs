//! Argon2id hashing for locally managed operator passwords.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::Argon2;

use mentor_core::ports::{AuthError, PasswordService};

/// Stores PHC-format Argon2id hashes.
///
/// A stored hash that no longer parses is treated as a failed match, so a
/// damaged account cannot sign in but does not surface as a server error.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::HashingError("password must not be empty".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;
        Ok(phc.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("Stored password hash is not a PHC string; rejecting sign-in");
            return Ok(false);
        };

        Ok(self.argon2.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}
