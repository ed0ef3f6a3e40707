//! envseal-crypto: authenticated symmetric encryption for opaque tokens
//!
//! Construction: Encrypt-then-MAC over AES-256-CBC
//!
//! Pipeline: secret → HMAC key derivation → {cipher key, auth key}
//! plaintext → AES-CBC (random IV) → HMAC tag over IV‖ciphertext → base64
//!
//! Envelope layout:
//! ```text
//! base64( [tag: digest size][16-byte IV][N × 16-byte ciphertext] )
//! ```
//!
//! Decryption is fail-closed: the tag is verified in constant time before
//! the cipher ever runs, and every rejection path collapses to the same
//! `None`.

pub mod cipher;
pub mod encryptor;
pub mod kdf;
pub mod mac;

pub use encryptor::Encryptor;
pub use kdf::{derive_authentication_key, derive_encryption_key, AuthKey, CipherKey};
pub use mac::{compute_tag, verify_tag};

/// Size of an AES-256 cipher key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of an AES block, and of the IV, in bytes
pub const BLOCK_SIZE: usize = 16;
