//! Salted password hashing with Argon2id

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

use crate::error::AuthError;

/// A stored password credential in PHC string format
///
/// The plaintext is never kept; `Debug` prints only the algorithm prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    /// Hash a password with a fresh random salt
    pub fn hash(password: &str) -> Result<Self, AuthError> {
        let mut salt = [0u8; 16];
        rand::rng().fill_bytes(&mut salt);
        let salt_string = SaltString::encode_b64(&salt).map_err(|e| AuthError::Hash(e.to_string()))?;

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt_string)
            .map_err(|e| AuthError::Hash(e.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// Check a candidate password against this credential
    pub fn verify(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.0) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!("Failed to parse password hash: {}", e);
                return false;
            }
        };

        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let algorithm = self.0.split('$').nth(1).unwrap_or("?");
        write!(f, "PasswordCredential({algorithm})")
    }
}
