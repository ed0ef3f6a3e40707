use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EnvsealError, EnvsealResult};

/// Block cipher used for the confidentiality layer.
///
/// The supported set is closed: one audited cipher + mode. Arbitrary
/// algorithm name strings are rejected at parse time, not deferred to
/// first use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    /// AES-256 in CBC mode with PKCS#7 padding
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
}

impl CipherAlgorithm {
    /// Cipher key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes256Cbc => 32,
        }
    }

    /// Block (and IV) length in bytes.
    pub const fn block_len(self) -> usize {
        match self {
            Self::Aes256Cbc => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = EnvsealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aes-256-cbc" => Ok(Self::Aes256Cbc),
            other => Err(EnvsealError::UnsupportedCipher(other.to_string())),
        }
    }
}

/// Digest used for both key derivation and message authentication.
///
/// The digest's output size fixes the derived-key length and the tag
/// length in the envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "sha-256")]
    Sha256,
    #[serde(rename = "sha-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Digest output length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha-256",
            Self::Sha512 => "sha-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = EnvsealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha-256" => Ok(Self::Sha256),
            "sha-512" => Ok(Self::Sha512),
            other => Err(EnvsealError::UnsupportedHash(other.to_string())),
        }
    }
}

/// Algorithm selection for an `Encryptor` (embeddable as a `[crypto]`
/// section in a host application's config file).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Block cipher + mode (default: aes-256-cbc)
    pub cipher: CipherAlgorithm,
    /// Digest for key derivation and MAC (default: sha-256)
    pub hash: HashAlgorithm,
}

impl CryptoConfig {
    /// Build a config from algorithm name strings, validating both against
    /// the supported set. Unknown names fail here, before any key material
    /// is derived.
    pub fn from_names(cipher: &str, hash: &str) -> EnvsealResult<Self> {
        Ok(Self {
            cipher: cipher.parse()?,
            hash: hash.parse()?,
        })
    }
}
