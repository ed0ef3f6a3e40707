//! The sealing facade: encrypt-then-MAC with a base64 envelope
//!
//! Envelope layout (before base64):
//! ```text
//! [tag: digest size][16 bytes: IV][N × 16 bytes: ciphertext]
//! ```
//!
//! The tag authenticates everything after it — IV included — and is
//! verified before the cipher ever touches the body, so tampered input is
//! rejected without acting as a decryption oracle.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use envseal_core::config::CryptoConfig;
use envseal_core::error::EnvsealResult;

use crate::cipher;
use crate::kdf::{derive_authentication_key, derive_encryption_key, AuthKey, CipherKey};
use crate::mac;
use crate::BLOCK_SIZE;

/// Authenticated symmetric encryption of opaque byte payloads.
///
/// Keys are derived exactly once at construction and held immutably for
/// the instance's lifetime; the secret itself is never retained. All
/// fields are immutable bytes, so an `Encryptor` is `Send + Sync` and safe
/// to call concurrently from many threads — each `encrypt` draws its own
/// IV from the thread-local CSPRNG.
#[derive(Debug, Clone)]
pub struct Encryptor {
    config: CryptoConfig,
    encryption_key: CipherKey,
    authentication_key: AuthKey,
}

impl Encryptor {
    /// Build an encryptor with the default algorithms (AES-256-CBC,
    /// SHA-256). The secret should carry at least 32 bytes of entropy;
    /// entropy policy belongs to the caller and is not validated here.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_config(secret, CryptoConfig::default())
    }

    /// Build an encryptor with an explicit, already-validated config.
    ///
    /// The secret is consumed here for key derivation and never stored.
    pub fn with_config(secret: &[u8], config: CryptoConfig) -> Self {
        let encryption_key = derive_encryption_key(config.hash, secret);
        let authentication_key = derive_authentication_key(config.hash, secret);
        Self {
            config,
            encryption_key,
            authentication_key,
        }
    }

    /// Build an encryptor from algorithm name strings.
    ///
    /// Unknown names fail here, before any key material is derived.
    pub fn from_names(secret: &[u8], cipher: &str, hash: &str) -> EnvsealResult<Self> {
        let config = CryptoConfig::from_names(cipher, hash)?;
        Ok(Self::with_config(secret, config))
    }

    /// Encrypt `message` into a sealed, base64-encoded envelope.
    ///
    /// Succeeds for any finite input. Output is a single unbroken line of
    /// standard-alphabet base64 with padding.
    pub fn encrypt(&self, message: &[u8]) -> String {
        let (iv, ciphertext) = cipher::encrypt(self.encryption_key.as_bytes(), message);

        let mut body = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        body.extend_from_slice(&iv);
        body.extend_from_slice(&ciphertext);

        let tag = mac::compute_tag(
            self.config.hash,
            self.authentication_key.as_bytes(),
            &body,
        );

        let mut envelope = Vec::with_capacity(tag.len() + body.len());
        envelope.extend_from_slice(&tag);
        envelope.extend_from_slice(&body);
        STANDARD.encode(&envelope)
    }

    /// Decrypt an envelope produced by [`encrypt`](Self::encrypt).
    ///
    /// Authentication strictly precedes decryption. Decode failure, short
    /// input, tag mismatch, and cipher-level failure all collapse to the
    /// same `None` — the caller can never tell which condition fired.
    pub fn decrypt(&self, encoded: &str) -> Option<Vec<u8>> {
        let plaintext = self.verify_and_decrypt(encoded);
        if plaintext.is_none() {
            // One debug line for every rejection path; no cause recorded.
            tracing::debug!(encoded_len = encoded.len(), "rejecting envelope");
        }
        plaintext
    }

    fn verify_and_decrypt(&self, encoded: &str) -> Option<Vec<u8>> {
        let envelope = STANDARD.decode(encoded).ok()?;

        let tag_len = self.config.hash.digest_len();
        if envelope.len() < tag_len {
            return None;
        }
        let (tag, body) = envelope.split_at(tag_len);

        if !mac::verify_tag(
            self.config.hash,
            self.authentication_key.as_bytes(),
            tag,
            body,
        ) {
            return None;
        }

        cipher::decrypt(self.encryption_key.as_bytes(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envseal_core::config::HashAlgorithm;
    use proptest::prelude::*;

    // 64 hex characters, ≥32 bytes of entropy as recommended
    const SECRET: &str = "3f9a1c77d02b58e4a6f013c9bb74d2805e1f6a4c9d83b7250c4e8f1a6b3d970e";

    fn test_encryptor() -> Encryptor {
        Encryptor::new(SECRET.as_bytes())
    }

    #[test]
    fn test_hello_world_roundtrip() {
        let enc = test_encryptor();
        let encoded = enc.encrypt(b"hello world");
        assert_eq!(enc.decrypt(&encoded).unwrap(), b"hello world");
    }

    #[test]
    fn test_mutated_envelope_rejected() {
        let enc = test_encryptor();
        let encoded = enc.encrypt(b"hello world");

        let mut chars: Vec<char> = encoded.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let mutated: String = chars.into_iter().collect();

        assert_ne!(mutated, encoded);
        assert!(enc.decrypt(&mutated).is_none());
    }

    #[test]
    fn test_empty_message_roundtrip() {
        let enc = test_encryptor();
        let encoded = enc.encrypt(b"");
        assert_eq!(enc.decrypt(&encoded).unwrap(), b"");
    }

    #[test]
    fn test_binary_message_roundtrip() {
        let enc = test_encryptor();
        let message: Vec<u8> = (0u8..=255).collect();
        let encoded = enc.encrypt(&message);
        assert_eq!(enc.decrypt(&encoded).unwrap(), message);
    }

    #[test]
    fn test_same_message_encrypts_differently() {
        let enc = test_encryptor();
        let e1 = enc.encrypt(b"repeated message");
        let e2 = enc.encrypt(b"repeated message");
        assert_ne!(e1, e2, "fresh IV must randomize the envelope");
        assert_eq!(enc.decrypt(&e1).unwrap(), enc.decrypt(&e2).unwrap());
    }

    #[test]
    fn test_envelope_is_single_line_base64() {
        let enc = test_encryptor();
        let encoded = enc.encrypt(&[0xFFu8; 100]);
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
        assert!(STANDARD.decode(&encoded).is_ok());
    }

    #[test]
    fn test_envelope_layout_lengths() {
        let enc = test_encryptor();
        for len in [0usize, 1, 15, 16, 17, 100] {
            let message = vec![0u8; len];
            let encoded = enc.encrypt(&message);
            let envelope = STANDARD.decode(&encoded).unwrap();
            let padded = (len / BLOCK_SIZE + 1) * BLOCK_SIZE;
            // tag (32) + IV (16) + padded ciphertext
            assert_eq!(envelope.len(), 32 + BLOCK_SIZE + padded, "message len {len}");
        }
    }

    #[test]
    fn test_sha512_roundtrip_and_tag_width() {
        let config = CryptoConfig {
            hash: HashAlgorithm::Sha512,
            ..CryptoConfig::default()
        };
        let enc = Encryptor::with_config(SECRET.as_bytes(), config);
        let encoded = enc.encrypt(b"wider tags");
        let envelope = STANDARD.decode(&encoded).unwrap();
        assert_eq!(envelope.len(), 64 + BLOCK_SIZE + BLOCK_SIZE);
        assert_eq!(enc.decrypt(&encoded).unwrap(), b"wider tags");
    }

    #[test]
    fn test_hash_choice_is_not_interchangeable() {
        let sha256 = test_encryptor();
        let sha512 = Encryptor::with_config(
            SECRET.as_bytes(),
            CryptoConfig {
                hash: HashAlgorithm::Sha512,
                ..CryptoConfig::default()
            },
        );
        let encoded = sha256.encrypt(b"pinned to sha-256");
        assert!(sha512.decrypt(&encoded).is_none());
    }

    #[test]
    fn test_garbage_inputs_return_none() {
        let enc = test_encryptor();
        assert!(enc.decrypt("").is_none());
        assert!(enc.decrypt("A").is_none());
        assert!(enc.decrypt("!!!not base64 at all!!!").is_none());
        assert!(enc.decrypt("AAAA").is_none()); // decodes, but far too short
        assert!(enc.decrypt("aGVsbG8gd29ybGQ=").is_none()); // valid base64, no envelope
    }

    #[test]
    fn test_truncated_envelope_rejected() {
        let enc = test_encryptor();
        let encoded = enc.encrypt(b"truncate me");
        let truncated = &encoded[..encoded.len() / 2];
        assert!(enc.decrypt(truncated).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let enc = test_encryptor();
        let other = Encryptor::new(b"a completely different secret value here");
        let encoded = enc.encrypt(b"for the right keyholder only");
        assert!(other.decrypt(&encoded).is_none());
    }

    #[test]
    fn test_from_names_valid() {
        let enc = Encryptor::from_names(SECRET.as_bytes(), "aes-256-cbc", "sha-256").unwrap();
        let encoded = enc.encrypt(b"named algorithms");
        assert_eq!(enc.decrypt(&encoded).unwrap(), b"named algorithms");
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        assert!(Encryptor::from_names(SECRET.as_bytes(), "rc4", "sha-256").is_err());
        assert!(Encryptor::from_names(SECRET.as_bytes(), "aes-256-cbc", "md5").is_err());
    }

    #[test]
    fn test_encryptor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Encryptor>();
    }

    proptest! {
        /// Round-trip holds for every byte sequence, empty included.
        #[test]
        fn prop_roundtrip(message in proptest::collection::vec(any::<u8>(), 0..=2048)) {
            let enc = test_encryptor();
            let encoded = enc.encrypt(&message);
            prop_assert_eq!(enc.decrypt(&encoded).unwrap(), message);
        }

        /// A single bit flip anywhere in the envelope — tag, IV, or
        /// ciphertext region — is rejected.
        #[test]
        fn prop_bit_flip_rejected(
            message in proptest::collection::vec(any::<u8>(), 0..=512),
            idx in any::<prop::sample::Index>(),
            bit in 0u32..8,
        ) {
            let enc = test_encryptor();
            let encoded = enc.encrypt(&message);
            let mut envelope = STANDARD.decode(&encoded).unwrap();
            let i = idx.index(envelope.len());
            envelope[i] ^= 1u8 << bit;
            let tampered = STANDARD.encode(&envelope);
            prop_assert!(enc.decrypt(&tampered).is_none());
        }

        /// Arbitrary foreign text never panics and never authenticates.
        #[test]
        fn prop_foreign_text_rejected(input in ".{0,256}") {
            let enc = test_encryptor();
            prop_assert!(enc.decrypt(&input).is_none());
        }
    }
}
