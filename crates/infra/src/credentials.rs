//! PBKDF2-backed credential verifier.

use anyhow::{Result, anyhow};
use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;

use campus_auth::CredentialVerifier;

/// Salted PBKDF2 hashes in PHC string format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pbkdf2Verifier;

impl Pbkdf2Verifier {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialVerifier for Pbkdf2Verifier {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Pbkdf2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| anyhow!("password hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Pbkdf2.verify_password(plaintext.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let verifier = Pbkdf2Verifier::new();
        let hash = verifier.hash("Secret1!").unwrap();

        assert_ne!(hash, "Secret1!");
        assert!(verifier.verify("Secret1!", &hash));
        assert!(!verifier.verify("wrong", &hash));
    }

    #[test]
    fn malformed_stored_hash_reads_as_mismatch() {
        let verifier = Pbkdf2Verifier::new();
        assert!(!verifier.verify("anything", "not-a-phc-string"));
    }

    #[test]
    fn same_password_salts_differently() {
        let verifier = Pbkdf2Verifier::new();
        assert_ne!(
            verifier.hash("Secret1!").unwrap(),
            verifier.hash("Secret1!").unwrap()
        );
    }
}
