//! AES-256-CBC encryption/decryption with PKCS#7 padding
//!
//! Ciphertext body format (binary):
//! ```text
//! [16 bytes: random IV][N × 16 bytes: CBC ciphertext]
//! ```
//!
//! The IV is drawn fresh from the thread-local CSPRNG on every encrypt
//! call, never reused and never derived from the key.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

use crate::{BLOCK_SIZE, KEY_SIZE};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under `key` with a fresh random IV.
///
/// Returns the IV and ciphertext separately; the caller owns the envelope
/// layout. The ciphertext length is the plaintext length rounded up to
/// the next block boundary — padding adds 1–16 bytes, so an empty
/// plaintext still produces one full block.
pub fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8]) -> ([u8; BLOCK_SIZE], Vec<u8>) {
    let mut iv = [0u8; BLOCK_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    (iv, ciphertext)
}

/// Decrypt an `[IV][ciphertext]` body produced by [`encrypt`].
///
/// Returns `None` when the input is shorter than one IV, when the
/// remainder is empty or not block-aligned, or when the padding is
/// invalid after decryption. These cases are expected for tampered or
/// malformed input and all collapse to the same failure value — nothing
/// about which condition fired crosses this boundary.
pub fn decrypt(key: &[u8; KEY_SIZE], iv_and_ciphertext: &[u8]) -> Option<Vec<u8>> {
    if iv_and_ciphertext.len() < BLOCK_SIZE {
        return None;
    }
    let (iv, ciphertext) = iv_and_ciphertext.split_at(BLOCK_SIZE);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return None;
    }

    Aes256CbcDec::new_from_slices(key, iv)
        .ok()?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .ok()
}
