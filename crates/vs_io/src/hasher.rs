//! SHA-256 digests, lowercase hex.
//!
//! `fingerprint` hashes the canonical JSON of a ballot, so two ballots with the
//! same content share a fingerprint regardless of key order or whitespace in
//! the files they came from.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use vs_core::Ballot;

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON form of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// Content fingerprint of a ballot snapshot.
pub fn fingerprint(ballot: &Ballot) -> IoResult<String> {
    sha256_canonical(ballot)
}

/// SHA-256 over a file's raw bytes.
pub fn sha256_file(path: &Path) -> IoResult<String> {
    let f = File::open(path).map_err(|e| IoError::Hash(format!("{}: {e}", path.display())))?;
    let mut reader = BufReader::new(f);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
