//! vs_core: ballot data model for the VoteSecure ballot designer.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`vs_rules`, `vs_pipeline`, `vs_io`, `vs_report`, `vs_cli`):
//!
//! - Token ids: `ContestId`, `CandidateId`
//! - Entities: `Candidate`, `Contest`, `ContestType`, `BallotSettings`
//! - The owning `Ballot` with its add/update/delete operations
//! - A seedable RNG (ChaCha20) for the testing simulator
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod ballot;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod rng;

pub use ballot::Ballot;
pub use entities::{BallotSettings, Candidate, Contest, ContestType, SettingsPatch};
pub use errors::CoreError;
pub use ids::{CandidateId, ContestId};

/// True when an optional free-text field is absent, empty, or whitespace-only.
#[inline]
pub fn is_blank(s: Option<&str>) -> bool {
    s.map_or(true, |v| v.trim().is_empty())
}
