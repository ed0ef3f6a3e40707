//! Message authentication: HMAC tags and constant-time verification
//!
//! The comparison in [`verify_tag`] is the load-bearing property of this
//! crate: it must not short-circuit on the first differing byte, and a
//! wrong-length candidate must cost the same full-width comparison as a
//! wrong tag of the right length.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};
use subtle::{Choice, ConstantTimeEq};

use envseal_core::config::HashAlgorithm;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the HMAC tag of `message` under `key`.
///
/// Output length equals the digest size of `hash` (32 bytes for SHA-256,
/// 64 for SHA-512). Accepts keys of any length, including longer than the
/// digest block size.
pub fn compute_tag(hash: HashAlgorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    match hash {
        HashAlgorithm::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut mac =
                HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Verify `candidate` against the tag of `message` in constant time.
///
/// The expected tag is compared against a fixed-width probe buffer: a
/// candidate of the wrong length is folded into a same-length buffer that
/// cannot match, so every call runs one full `ct_eq` over digest-size
/// buffers regardless of where (or whether) a mismatch occurs.
pub fn verify_tag(hash: HashAlgorithm, key: &[u8], candidate: &[u8], message: &[u8]) -> bool {
    let expected = compute_tag(hash, key, message);

    let mut probe = vec![0u8; expected.len()];
    let len_ok = candidate.len() == expected.len();
    if len_ok {
        probe.copy_from_slice(candidate);
    }

    let eq = expected.ct_eq(&probe);
    bool::from(eq & Choice::from(len_ok as u8))
}
