//! Password hashing seam.
//!
//! The stored-hash comparison algorithm is injectable so deployments can
//! swap in a KDF-backed implementation without touching the credential
//! validator. The shipped default is hex-encoded SHA-256.

use sha2::{Digest, Sha256};

/// Hashing and verification of user passwords.
pub trait PasswordHasher: Send + Sync {
    /// Produce the stored representation of a plaintext password.
    fn hash(&self, plaintext: &str) -> String;

    /// Check a plaintext password against a stored hash.
    ///
    /// Implementations must compare in constant time so a caller cannot
    /// distinguish "unknown user" from "wrong password" by timing.
    fn verify(&self, plaintext: &str, stored: &str) -> bool;
}

/// Hex-encoded SHA-256 password hasher.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    fn digest(plaintext: &str) -> [u8; 32] {
        Sha256::digest(plaintext.as_bytes()).into()
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plaintext: &str) -> String {
        hex::encode(Self::digest(plaintext))
    }

    fn verify(&self, plaintext: &str, stored: &str) -> bool {
        let Ok(stored_bytes) = hex::decode(stored) else {
            return false;
        };
        constant_time_eq(&Self::digest(plaintext), &stored_bytes)
    }
}

/// Length-then-bitwise comparison without data-dependent early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0_u8;
    for (lhs, rhs) in a.iter().zip(b.iter()) {
        diff |= lhs ^ rhs;
    }
    diff == 0
}
