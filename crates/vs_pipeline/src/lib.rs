//! vs_pipeline: everything that runs over a ballot snapshot.
//!
//! - `validate`: one full pass of the rule catalogue → `ValidationReport`
//! - `engine`: cached last report, revision-driven refresh, observers, and a
//!   `BallotSession` that re-validates after every edit
//! - `templates`: built-in ballot templates and search
//! - `simulate`: seeded voter-experience simulation and selection rules
//! - `summary`: contest/candidate counts for previews
//!
//! This crate stays I/O-free; loading/saving lives in `vs_io`.

#![forbid(unsafe_code)]

pub mod engine;
pub mod simulate;
pub mod summary;
pub mod templates;
pub mod validate;

pub use engine::{BallotSession, ValidationEngine};
pub use summary::BallotSummary;
pub use validate::{evaluate, evaluate_at, ValidationIssue, ValidationReport};
