//! Error taxonomy for the vouch credential authority.
//!
//! Every fallible library operation returns [`VouchError`]. Verification
//! failures are an expected outcome (adversarial input is the normal case)
//! and are converted to a user-facing line at the CLI boundary; the other
//! variants abort the current operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VouchError {
    /// The authority key pair has not been generated yet. Checked before
    /// any other work, in particular before opening the record store.
    #[error("authority keys not initialized; run `generate-authority-keys` first")]
    NotInitialized,

    /// An authority key pair already exists at the given location and
    /// overwriting was not requested.
    #[error("authority keys already exist at {}; pass --force to overwrite", .0.display())]
    AlreadyInitialized(PathBuf),

    /// Key material handed to issuance could not be parsed.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The certificate does not invert under the given authority public
    /// key: malformed, truncated, tampered, or issued by someone else.
    #[error("certificate verification failed: {0}")]
    VerificationFailed(String),

    /// The record store could not be reached or opened.
    #[error("record store connection failed: {0}")]
    Connection(String),

    /// The record store rejected the write (duplicate external id,
    /// schema violation).
    #[error("record store rejected the write: {0}")]
    Persistence(String),

    /// Artifact read/write failure (authority key files, bundle export).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VouchResult<T> = Result<T, VouchError>;
