//! vs_io: file boundary for ballots and rule parameters.
//!
//! - `loader`: read/write ballot JSON and rule-parameter JSON
//! - `canonical_json`: sorted-key compact JSON and atomic file writes
//! - `hasher`: SHA-256 (lowercase hex) and ballot fingerprints
//!
//! Paths are local only; anything that looks like `<scheme>://` is rejected.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use canonical_json::{to_canonical_bytes, write_atomic, write_canonical_file};
pub use hasher::{fingerprint, sha256_hex};
pub use loader::{load_ballot, load_rule_params, looks_like_url, parse_ballot, save_ballot};

#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors with a JSON Pointer to the offending spot.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    #[error("hash error: {0}")]
    Hash(String),

    /// Well-formed JSON that breaks a model invariant (duplicate ids, bad domains).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

impl From<vs_core::CoreError> for IoError {
    fn from(e: vs_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

impl From<vs_rules::ParamError> for IoError {
    fn from(e: vs_rules::ParamError) -> Self {
        IoError::Invalid(e.to_string())
    }
}
