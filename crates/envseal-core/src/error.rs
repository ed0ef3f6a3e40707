use thiserror::Error;

pub type EnvsealResult<T> = Result<T, EnvsealError>;

/// Construction-time failures. Misconfiguration is the only error class
/// envseal surfaces by name: per-message decryption failures are reported
/// as a bare `None` so that no rejection path is distinguishable from
/// another.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvsealError {
    #[error("unsupported cipher algorithm: {0:?}")]
    UnsupportedCipher(String),

    #[error("unsupported hash algorithm: {0:?}")]
    UnsupportedHash(String),
}
