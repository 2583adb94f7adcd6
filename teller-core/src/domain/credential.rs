//! Credential hashing
//!
//! PINs are stored as Argon2id hashes in PHC string format. The salt and the
//! Argon2 parameters travel inside the string, so a snapshot written with
//! different parameters still verifies after a load.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// A one-way hash of an account PIN
///
/// Never holds the plaintext PIN. Verification goes through the
/// password-hash API, which compares digests in constant time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Hash a plaintext PIN with a fresh random salt
    pub fn derive(pin: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|e| Error::Credential(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Verify a presented PIN against this hash
    ///
    /// Returns false for a mismatch or an unparseable stored hash; the
    /// caller maps both onto the same `AuthFailure`.
    pub fn verify(&self, pin: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(pin.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// The PHC string form, as persisted in snapshots
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CredentialHash> for String {
    fn from(hash: CredentialHash) -> Self {
        hash.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_and_verify() {
        let hash = CredentialHash::derive("1234").unwrap();
        assert!(hash.verify("1234"));
        assert!(!hash.verify("4321"));
    }

    #[test]
    fn test_distinct_salts() {
        let a = CredentialHash::derive("1234").unwrap();
        let b = CredentialHash::derive("1234").unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_phc_format() {
        let hash = CredentialHash::derive("0000").unwrap();
        assert!(hash.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_garbage_stored_hash_never_verifies() {
        let hash = CredentialHash("not-a-phc-string".to_string());
        assert!(!hash.verify("1234"));
    }
}
