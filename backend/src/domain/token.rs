//! Bearer token issuance.
//!
//! Tokens are pure output artefacts: issued once for a validated identity,
//! never stored, refreshed, or revoked by this core.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

use super::user::Username;

/// Produces an opaque bearer token for a validated user identity.
pub trait TokenIssuer: Send + Sync {
    /// Issue a token bound to the given identity. The result is a non-empty
    /// opaque string.
    fn issue(&self, username: &Username) -> String;
}

/// Token issuer deriving hex tokens from the identity plus a random nonce.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueTokenIssuer;

impl TokenIssuer for OpaqueTokenIssuer {
    fn issue(&self, username: &Username) -> String {
        let mut nonce = [0_u8; 16];
        SmallRng::from_entropy().fill_bytes(&mut nonce);

        let mut hasher = Sha256::new();
        hasher.update(username.as_ref().as_bytes());
        hasher.update(nonce);
        hex::encode(hasher.finalize())
    }
}
