use anyhow::Result;

/// One-way credential primitive.
///
/// The hash format is opaque to callers; there is no decryption path. The
/// concrete implementation lives in the infrastructure crate so this one
/// stays free of crypto dependencies.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a plaintext secret for storage.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// Check a plaintext secret against a stored hash. Malformed stored
    /// hashes read as a mismatch, never as an error.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool;
}
