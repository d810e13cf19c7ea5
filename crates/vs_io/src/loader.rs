//! Loader: local ballot and rule-parameter files. No network I/O.
//!
//! Ballot files have the shape `{"settings": {...}, "contests": [...]}` with
//! camelCase field names. Loaded ballots are checked for id uniqueness and
//! `maxSelections >= 1`; content completeness is left to validation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use vs_core::Ballot;
use vs_rules::{validate_domains, RuleParams};

use crate::canonical_json::write_canonical_file;
use crate::{IoError, IoResult};

const MAX_INPUT_BYTES: u64 = 4 * 1024 * 1024;

/// True for anything shaped like `<scheme>://`, including `file://`.
#[inline]
pub fn looks_like_url(s: &str) -> bool {
    s.trim().contains("://")
}

fn read_json_value(path: &Path) -> IoResult<Value> {
    let shown = path.to_string_lossy();
    if looks_like_url(&shown) {
        return Err(IoError::Path(format!("{shown}: URLs are not accepted, use a local path")));
    }
    let f = File::open(path).map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    let mut buf = Vec::new();
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Invalid(format!("{shown}: larger than {MAX_INPUT_BYTES} bytes")));
    }
    Ok(serde_json::from_slice(&buf)?)
}

fn from_value<T: DeserializeOwned>(v: Value) -> IoResult<T> {
    serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: e.to_string(),
    })
}

/// Parse a ballot from JSON text and check its model invariants.
pub fn parse_ballot(text: &str) -> IoResult<Ballot> {
    let v: Value = serde_json::from_str(text)?;
    ballot_from_value(v)
}

fn ballot_from_value(v: Value) -> IoResult<Ballot> {
    let ballot: Ballot = from_value(v)?;
    if let Some(i) = ballot.contests().iter().position(|c| c.max_selections == 0) {
        return Err(IoError::Json {
            pointer: format!("/contests/{i}/maxSelections"),
            msg: "must be >= 1".into(),
        });
    }
    ballot.check_ids()?;
    Ok(ballot)
}

pub fn load_ballot(path: &Path) -> IoResult<Ballot> {
    let ballot = ballot_from_value(read_json_value(path)?)?;
    tracing::debug!(
        path = %path.display(),
        contests = ballot.contests().len(),
        "ballot loaded"
    );
    Ok(ballot)
}

/// Save as canonical JSON (sorted keys, compact) via an atomic write.
pub fn save_ballot(path: &Path, ballot: &Ballot) -> IoResult<()> {
    write_canonical_file(path, ballot)?;
    tracing::debug!(path = %path.display(), "ballot saved");
    Ok(())
}

/// Rule parameters file, e.g. `{"max_contest_title_len": 60}`. Missing keys
/// take their defaults; unknown keys are rejected.
pub fn load_rule_params(path: &Path) -> IoResult<RuleParams> {
    let params: RuleParams = from_value(read_json_value(path)?)?;
    validate_domains(&params)?;
    Ok(params)
}
