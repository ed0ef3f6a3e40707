//! Key derivation: one shared secret → two purpose-bound keys
//!
//! Each key is HMAC(key = secret, message = label) under the configured
//! digest. The secret is the HMAC key — not the message — so the full
//! entropy of a long secret flows into the derived key instead of being
//! truncated or padded away. The two fixed labels give domain separation:
//! the cipher key and the auth key always differ, even though both come
//! from the same secret.

use zeroize::Zeroize;

use envseal_core::config::HashAlgorithm;

use crate::mac::compute_tag;
use crate::KEY_SIZE;

const ENCRYPTION_LABEL: &[u8] = b"encryption";
const AUTHENTICATION_LABEL: &[u8] = b"authentication";

/// The cipher key for the confidentiality layer (AES-256, 32 bytes).
///
/// Zeroized on drop to prevent key material lingering in memory.
#[derive(Clone)]
pub struct CipherKey {
    bytes: [u8; KEY_SIZE],
}

impl CipherKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for CipherKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// The authentication key for the MAC layer (full digest width).
///
/// Zeroized on drop.
#[derive(Clone)]
pub struct AuthKey {
    bytes: Vec<u8>,
}

impl AuthKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for AuthKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the cipher key from the shared secret.
///
/// Takes the leading [`KEY_SIZE`] bytes of the digest output — exact for
/// SHA-256, truncating for SHA-512. Every supported digest emits at least
/// [`KEY_SIZE`] bytes.
pub fn derive_encryption_key(hash: HashAlgorithm, secret: &[u8]) -> CipherKey {
    let mut okm = compute_tag(hash, secret, ENCRYPTION_LABEL);
    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&okm[..KEY_SIZE]);
    okm.zeroize();
    CipherKey::from_bytes(bytes)
}

/// Derive the authentication key from the shared secret.
pub fn derive_authentication_key(hash: HashAlgorithm, secret: &[u8]) -> AuthKey {
    AuthKey::from_bytes(compute_tag(hash, secret, AUTHENTICATION_LABEL))
}
