//! Minimal error set for the ballot data model.

use thiserror::Error;

use crate::ids::{CandidateId, ContestId};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("contest not found: {0}")]
    ContestNotFound(ContestId),
    #[error("candidate {candidate} not found in contest {contest}")]
    CandidateNotFound {
        contest: ContestId,
        candidate: CandidateId,
    },
    #[error("duplicate contest id: {0}")]
    DuplicateContest(ContestId),
    #[error("duplicate candidate id: {0}")]
    DuplicateCandidate(CandidateId),
    #[error("domain out of range: {0}")]
    DomainOutOfRange(&'static str),
}
